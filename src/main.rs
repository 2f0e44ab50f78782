mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

const DEFAULT_LOG_FILTER: &str = "booktoc=info";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
            error!(error = %err, ?causes, "booktoc failed");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Outline(args) => commands::outline::run(args),
        Commands::SaveOutline(args) => commands::outline::save(args),
        Commands::Normalize(args) => commands::normalize::run(args),
        Commands::Chapters(args) => commands::chapters::run(args),
        Commands::Split(args) => commands::split::run(args),
        Commands::ExtractSpan(args) => commands::split::check_span(args),
        Commands::Recent(args) => commands::recent::run(args),
    }
}

/// Logs go to stderr so JSON results on stdout stay machine readable.
/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

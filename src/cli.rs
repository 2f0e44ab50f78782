use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "booktoc",
    version,
    about = "Outline trees, chapter detection and chapter page ranges for book PDFs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a table of contents as a nested outline.
    Outline(OutlineArgs),
    /// Validate an edited outline and flatten it for bookmark persistence.
    SaveOutline(SaveOutlineArgs),
    /// Convert printed page numbers to absolute pages.
    Normalize(NormalizeArgs),
    /// List the entries detected as top-level chapters.
    Chapters(ChaptersArgs),
    /// Compute per-chapter page ranges and output file names.
    Split(SplitArgs),
    /// Validate a page span, such as the pages holding the printed contents.
    ExtractSpan(ExtractSpanArgs),
    /// Record or list when documents were last opened.
    Recent(RecentArgs),
}

/// A `{ "toc": [...] }` file and how its page numbers map onto the document.
#[derive(Args, Debug, Clone)]
pub struct TocSourceArgs {
    #[arg(long, default_value = "toc.json")]
    pub toc_json: PathBuf,

    #[arg(long)]
    pub total_pages: u32,

    /// Absolute page = printed page + offset.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub page_offset: i64,
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[command(flatten)]
    pub source: TocSourceArgs,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SaveOutlineArgs {
    #[arg(long)]
    pub outline: PathBuf,

    #[arg(long)]
    pub total_pages: u32,

    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub source: TocSourceArgs,

    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ChaptersArgs {
    #[command(flatten)]
    pub source: TocSourceArgs,

    /// Extra chapter-number pattern, matched at the start of each title.
    #[arg(long = "heading-pattern")]
    pub heading_patterns: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    #[command(flatten)]
    pub source: TocSourceArgs,

    /// Explicit `{ "chapters": [{title, page}] }` selection instead of
    /// detection. Its pages are already absolute, so no offset or heading
    /// pattern applies, and an empty selection is an error.
    #[arg(long, conflicts_with_all = ["page_offset", "heading_patterns"])]
    pub chapters: Option<PathBuf>,

    #[arg(long = "heading-pattern")]
    pub heading_patterns: Vec<String>,

    /// Book PDF path, used to name the output folder next to it.
    #[arg(long)]
    pub book: Option<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractSpanArgs {
    #[arg(long)]
    pub start: u32,

    #[arg(long)]
    pub end: u32,

    #[arg(long)]
    pub total_pages: u32,
}

#[derive(Args, Debug, Clone)]
pub struct RecentArgs {
    #[arg(long, default_value = ".pdf_last_opened.json")]
    pub store: PathBuf,

    /// Document to mark as opened now.
    #[arg(long)]
    pub touch: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("booktoc").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn split_accepts_explicit_chapters() {
        let cli = parse(&["split", "--total-pages", "10", "--chapters", "c.json"]).unwrap();
        let Commands::Split(args) = cli.command else {
            panic!("expected split command");
        };
        assert_eq!(args.chapters, Some(PathBuf::from("c.json")));
        assert_eq!(args.source.page_offset, 0);
    }

    #[test]
    fn split_rejects_offset_with_explicit_chapters() {
        let err = parse(&[
            "split",
            "--total-pages",
            "10",
            "--chapters",
            "c.json",
            "--page-offset",
            "3",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn split_rejects_heading_pattern_with_explicit_chapters() {
        let err = parse(&[
            "split",
            "--total-pages",
            "10",
            "--chapters",
            "c.json",
            "--heading-pattern",
            "^Part",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn negative_page_offset_parses() {
        let cli = parse(&[
            "normalize",
            "--total-pages",
            "300",
            "--page-offset",
            "-2",
            "--output",
            "out.json",
        ])
        .unwrap();
        let Commands::Normalize(args) = cli.command else {
            panic!("expected normalize command");
        };
        assert_eq!(args.source.page_offset, -2);
    }
}

use anyhow::Result;
use booktoc::model::TocPayload;
use booktoc::util::write_json_pretty;
use tracing::info;

use crate::cli::NormalizeArgs;
use crate::commands::load_entries;

pub fn run(args: NormalizeArgs) -> Result<()> {
    let entries = load_entries(&args.source)?;

    write_json_pretty(&args.output, &TocPayload::from_entries(&entries))?;
    info!(
        path = %args.output.display(),
        entries = entries.len(),
        "wrote absolute-page table of contents"
    );

    Ok(())
}

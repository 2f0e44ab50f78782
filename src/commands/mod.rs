pub mod chapters;
pub mod normalize;
pub mod outline;
pub mod recent;
pub mod split;

use anyhow::{Context, Result};
use booktoc::NumberedHeadings;
use booktoc::model::TocEntry;
use booktoc::parse_toc_payload;
use booktoc::util::read_text;
use tracing::info;

use crate::cli::TocSourceArgs;

/// Reads a `{ "toc": [...] }` file and maps it onto absolute pages.
pub(crate) fn load_entries(source: &TocSourceArgs) -> Result<Vec<TocEntry>> {
    let raw = read_text(&source.toc_json)?;
    let payload = parse_toc_payload(&raw)
        .with_context(|| format!("failed to parse {}", source.toc_json.display()))?;
    let entries = payload
        .to_entries(source.page_offset, source.total_pages)
        .with_context(|| format!("invalid entry in {}", source.toc_json.display()))?;

    info!(
        path = %source.toc_json.display(),
        entries = entries.len(),
        page_offset = source.page_offset,
        total_pages = source.total_pages,
        "loaded table of contents"
    );

    Ok(entries)
}

pub(crate) fn heading_predicate(extra_patterns: &[String]) -> Result<NumberedHeadings> {
    let mut predicate = NumberedHeadings::new().context("failed to compile chapter patterns")?;
    for pattern in extra_patterns {
        predicate = predicate
            .with_pattern(pattern)
            .with_context(|| format!("invalid --heading-pattern: {pattern}"))?;
    }
    Ok(predicate)
}

use anyhow::Result;
use booktoc::model::{ChapterAnchor, TocEntry};
use booktoc::util::emit_json;
use booktoc::{ChapterHeading, OutlineError, detect_chapter_boundaries};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::ChaptersArgs;
use crate::commands::{heading_predicate, load_entries};

/// `{ "chapters": [{title, page}] }`, the shape both listed and hand-picked
/// chapter selections use.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ChapterSelection {
    pub chapters: Vec<ChapterAnchor>,
}

pub fn run(args: ChaptersArgs) -> Result<()> {
    let entries = load_entries(&args.source)?;
    let predicate = heading_predicate(&args.heading_patterns)?;

    let selection = select_chapters(&entries, &predicate)?;
    emit_json(None, &selection)
}

/// Detected chapters; an outline without any candidate is an empty selection.
pub(crate) fn select_chapters<P: ChapterHeading>(
    entries: &[TocEntry],
    predicate: &P,
) -> Result<ChapterSelection> {
    match detect_chapter_boundaries(entries, predicate) {
        Ok(boundaries) => {
            info!(chapters = boundaries.len(), "detected chapter boundaries");
            Ok(ChapterSelection {
                chapters: boundaries.iter().map(ChapterAnchor::from).collect(),
            })
        }
        Err(OutlineError::NoBoundariesFound) => {
            warn!("table of contents has no chapter entries; nothing to split");
            Ok(ChapterSelection::default())
        }
        Err(err) => Err(err.into()),
    }
}

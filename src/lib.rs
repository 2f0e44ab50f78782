//! Table-of-contents structure for paginated books: outline trees, chapter
//! boundary detection, chapter page ranges and printed-page offsets.

pub mod chapters;
pub mod error;
pub mod model;
pub mod offset;
pub mod outline;
pub mod payload;
pub mod recent;
pub mod split;
pub mod util;

pub use chapters::{ChapterHeading, NumberedHeadings, detect_chapter_boundaries};
pub use error::{OutlineError, Result};
pub use model::{
    Chapter, ChapterAnchor, EditedOutlineNode, OutlineNode, PlannedChapter, PrintedTocEntry,
    SplitPlan, TocEntry, TocPayload,
};
pub use offset::{apply_offset, to_absolute_page};
pub use outline::{
    OutlineTree, build_outline, flatten_edited_outline, flatten_outline, validate_entries,
};
pub use payload::parse_toc_payload;
pub use split::{PageSpan, compute_chapter_ranges, output_dir_name, sanitize_file_stem};

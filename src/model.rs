use serde::{Deserialize, Serialize};

/// One heading of the table of contents, in document order.
///
/// `page` is an absolute, 1-based index into the page container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u32,
    pub title: String,
    pub page: u32,
}

impl TocEntry {
    pub fn new(level: u32, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

/// Nested outline shape exchanged with display and editing front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub title: String,
    pub page: u32,
    pub level: u32,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

/// Outline node as sent back by an editing front end. Fields are kept loose
/// so a bad page or level is reported against the node's title instead of
/// failing deserialization of the whole tree.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EditedOutlineNode {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub page: serde_json::Value,
    #[serde(default)]
    pub level: serde_json::Value,
    #[serde(default)]
    pub children: Vec<EditedOutlineNode>,
}

/// Heading as recorded by the structured-extraction source, using the
/// book's printed page numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintedTocEntry {
    pub level: u32,
    pub title: String,
    pub page: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TocPayload {
    pub toc: Vec<PrintedTocEntry>,
}

/// A selected chapter start boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterAnchor {
    pub title: String,
    pub page: u32,
}

impl From<&TocEntry> for ChapterAnchor {
    fn from(entry: &TocEntry) -> Self {
        Self {
            title: entry.title.clone(),
            page: entry.page,
        }
    }
}

/// A chapter's inclusive absolute page range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
    pub file_stem: String,
}

impl Chapter {
    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedChapter {
    pub title: String,
    pub file_name: String,
    pub start_page: u32,
    pub end_page: u32,
}

/// Named page ranges handed to the extractor that materializes one file per
/// chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPlan {
    pub output_dir: String,
    pub total_pages: u32,
    pub chapters: Vec<PlannedChapter>,
}

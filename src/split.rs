//! Chapter page ranges and output naming.

use std::collections::HashSet;

use crate::error::{OutlineError, Result};
use crate::model::{Chapter, ChapterAnchor, PlannedChapter, SplitPlan};

const MAX_FILE_STEM_CHARS: usize = 100;
const UNTITLED_FILE_STEM: &str = "untitled";
const FORBIDDEN_PATH_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Computes contiguous chapter ranges from unsorted anchors.
///
/// Anchors are stably sorted by page. Each chapter runs up to the page before
/// the next anchor; the last one runs to `total_pages`. Out-of-range or
/// colliding anchors are clamped to a valid, at least single-page range.
pub fn compute_chapter_ranges(anchors: &[ChapterAnchor], total_pages: u32) -> Result<Vec<Chapter>> {
    if anchors.is_empty() {
        return Err(OutlineError::invalid_range("no chapters selected"));
    }
    if total_pages == 0 {
        return Err(OutlineError::invalid_range("document has no pages"));
    }

    let mut sorted: Vec<&ChapterAnchor> = anchors.iter().collect();
    sorted.sort_by_key(|anchor| anchor.page);

    let total = i64::from(total_pages);
    let mut chapters = Vec::with_capacity(sorted.len());

    for (index, anchor) in sorted.iter().enumerate() {
        let start = i64::from(anchor.page);
        let end = match sorted.get(index + 1) {
            Some(next) => i64::from(next.page) - 1,
            None => total,
        };

        let start = start.clamp(1, total);
        let end = end.max(start).clamp(start, total);

        chapters.push(Chapter {
            title: anchor.title.clone(),
            start_page: start as u32,
            end_page: end as u32,
            file_stem: sanitize_file_stem(&anchor.title),
        });
    }

    Ok(chapters)
}

/// Makes a title usable as a file name stem. Idempotent.
pub fn sanitize_file_stem(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|ch| {
            if FORBIDDEN_PATH_CHARS.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let truncated: String = trim_stem(&replaced)
        .chars()
        .take(MAX_FILE_STEM_CHARS)
        .collect();
    let stem = trim_stem(&truncated);

    if stem.is_empty() {
        UNTITLED_FILE_STEM.to_string()
    } else {
        stem.to_string()
    }
}

fn trim_stem(value: &str) -> &str {
    value.trim_matches(['.', ' '])
}

/// Folder name for a book's chapter files: the PDF stem without a trailing
/// `_toc` or `_bookmarked` marker left by earlier processing steps.
pub fn output_dir_name(pdf_stem: &str) -> String {
    pdf_stem
        .strip_suffix("_toc")
        .or_else(|| pdf_stem.strip_suffix("_bookmarked"))
        .unwrap_or(pdf_stem)
        .to_string()
}

impl SplitPlan {
    /// Assigns a `.pdf` file name to every chapter. Colliding stems get a
    /// numeric suffix so no chapter overwrites another.
    pub fn new(output_dir: impl Into<String>, chapters: &[Chapter], total_pages: u32) -> Self {
        let mut used = HashSet::new();
        let planned = chapters
            .iter()
            .map(|chapter| {
                let mut file_name = format!("{}.pdf", chapter.file_stem);
                let mut counter = 1;
                while !used.insert(file_name.to_lowercase()) {
                    counter += 1;
                    file_name = format!("{}_{counter}.pdf", chapter.file_stem);
                }

                PlannedChapter {
                    title: chapter.title.clone(),
                    file_name,
                    start_page: chapter.start_page,
                    end_page: chapter.end_page,
                }
            })
            .collect();

        Self {
            output_dir: output_dir.into(),
            total_pages,
            chapters: planned,
        }
    }
}

/// Inclusive, validated page span, such as the pages holding a printed table
/// of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    start: u32,
    end: u32,
}

impl PageSpan {
    pub fn new(start: u32, end: u32, total_pages: u32) -> Result<Self> {
        if start < 1 || end > total_pages || start > end {
            return Err(OutlineError::invalid_range(format!(
                "{start}-{end} (document has {total_pages} pages)"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(self) -> u32 {
        self.start
    }

    pub fn end(self) -> u32 {
        self.end
    }

    pub fn page_count(self) -> u32 {
        self.end - self.start + 1
    }
}

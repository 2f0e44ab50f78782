//! Printed page numbers to absolute page indices.

use crate::error::{OutlineError, Result};
use crate::model::{PrintedTocEntry, TocEntry};

/// `printed + offset`, clamped to `[1, total_pages]`.
pub fn to_absolute_page(printed_page: i64, offset: i64, total_pages: u32) -> u32 {
    let last = i64::from(total_pages.max(1));
    printed_page.saturating_add(offset).clamp(1, last) as u32
}

/// Maps a printed-page table of contents onto the page container.
///
/// Page numbers are clamped, never rejected. Entries with level 0 or a blank
/// title are rejected.
pub fn apply_offset(
    entries: &[PrintedTocEntry],
    offset: i64,
    total_pages: u32,
) -> Result<Vec<TocEntry>> {
    entries
        .iter()
        .map(|entry| {
            if entry.level == 0 {
                return Err(OutlineError::invalid_entry(
                    &entry.title,
                    entry.page,
                    "level must be at least 1",
                ));
            }
            if entry.title.trim().is_empty() {
                return Err(OutlineError::invalid_entry(
                    &entry.title,
                    entry.page,
                    "title must not be empty",
                ));
            }

            Ok(TocEntry::new(
                entry.level,
                entry.title.clone(),
                to_absolute_page(entry.page, offset, total_pages),
            ))
        })
        .collect()
}

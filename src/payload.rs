//! The `{ "toc": [...] }` object produced by structured extraction.
//!
//! Model responses sometimes wrap the JSON in a markdown code fence, so the
//! fence is stripped before parsing. Pages are printed page numbers until
//! [`TocPayload::to_entries`] applies the document's offset.

use crate::error::Result;
use crate::model::{PrintedTocEntry, TocEntry, TocPayload};
use crate::offset::apply_offset;

pub fn parse_toc_payload(text: &str) -> Result<TocPayload> {
    let payload = serde_json::from_str(strip_code_fence(text))?;
    Ok(payload)
}

fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if body.starts_with("```") {
        body = match body.split_once('\n') {
            Some((_, rest)) => rest,
            None => body.trim_start_matches('`'),
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

impl TocPayload {
    pub fn to_entries(&self, offset: i64, total_pages: u32) -> Result<Vec<TocEntry>> {
        apply_offset(&self.toc, offset, total_pages)
    }

    /// Payload for an already-absolute entry list, e.g. bookmarks read from
    /// the document itself.
    pub fn from_entries(entries: &[TocEntry]) -> Self {
        Self {
            toc: entries
                .iter()
                .map(|entry| PrintedTocEntry {
                    level: entry.level,
                    title: entry.title.clone(),
                    page: i64::from(entry.page),
                })
                .collect(),
        }
    }
}

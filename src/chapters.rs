//! Picks the entries that start top-level body chapters.

use regex::Regex;

use crate::error::{OutlineError, Result};
use crate::model::TocEntry;

/// Decides whether a heading title carries a chapter number.
pub trait ChapterHeading {
    fn is_chapter_heading(&self, title: &str) -> bool;
}

impl<F> ChapterHeading for F
where
    F: Fn(&str) -> bool,
{
    fn is_chapter_heading(&self, title: &str) -> bool {
        self(title)
    }
}

/// Numbering conventions recognized at the start of a trimmed title:
/// `Chapter 3 ...` (any case), `第3章 ...`, and a bare leading number such as
/// `3 Linear Algebra`.
#[derive(Debug, Clone)]
pub struct NumberedHeadings {
    patterns: Vec<Regex>,
}

const DEFAULT_PATTERNS: [&str; 3] = [r"(?i)^chapter\s+\d+", r"^第\s*\d+\s*章", r"^\d+\s"];

impl NumberedHeadings {
    pub fn new() -> Result<Self> {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Adds another convention. Patterns should anchor with `^`; they are
    /// matched against the trimmed title.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl ChapterHeading for NumberedHeadings {
    fn is_chapter_heading(&self, title: &str) -> bool {
        let title = title.trim();
        self.patterns.iter().any(|pattern| pattern.is_match(title))
    }
}

/// Selects chapter boundaries, in document order.
///
/// Numbered entries at the shallowest numbered level win. Without any
/// numbered entry, every entry at the shallowest level present is taken.
pub fn detect_chapter_boundaries<P>(entries: &[TocEntry], predicate: &P) -> Result<Vec<TocEntry>>
where
    P: ChapterHeading + ?Sized,
{
    let numbered: Vec<&TocEntry> = entries
        .iter()
        .filter(|entry| predicate.is_chapter_heading(&entry.title))
        .collect();

    let min_numbered_level = numbered.iter().map(|entry| entry.level).min();

    let selected: Vec<TocEntry> = match min_numbered_level {
        Some(min_level) => numbered
            .into_iter()
            .filter(|entry| entry.level == min_level)
            .cloned()
            .collect(),
        None => {
            let Some(min_level) = entries.iter().map(|entry| entry.level).min() else {
                return Err(OutlineError::NoBoundariesFound);
            };
            entries
                .iter()
                .filter(|entry| entry.level == min_level)
                .cloned()
                .collect()
        }
    };

    Ok(selected)
}

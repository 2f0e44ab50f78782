//! Error types for outline, boundary and range operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutlineError>;

#[derive(Error, Debug)]
pub enum OutlineError {
    /// An entry failed validation. The whole operation is rejected.
    #[error("invalid outline entry {title:?} (page {page}): {reason}")]
    InvalidEntry {
        title: String,
        page: i64,
        reason: String,
    },

    /// A split or span request cannot produce any page range.
    #[error("invalid page range: {reason}")]
    InvalidRange { reason: String },

    /// The entry sequence holds no candidate chapter boundary.
    #[error("no chapter boundaries found")]
    NoBoundariesFound,

    #[error("invalid chapter heading pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("malformed toc payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl OutlineError {
    pub(crate) fn invalid_entry(title: &str, page: i64, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            title: title.to_string(),
            page,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }
}

//! "Last opened" bookkeeping for documents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::warn;

use crate::util::write_json_atomic;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Document key to the local time it was last opened.
pub trait RecentStore {
    fn load(&self) -> Result<BTreeMap<String, String>>;

    fn record(&self, key: &str, at: DateTime<Local>) -> Result<()>;

    fn last_opened(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }
}

/// Single JSON object file. Unreadable content counts as an empty store.
#[derive(Debug, Clone)]
pub struct JsonRecentStore {
    path: PathBuf,
}

impl JsonRecentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentStore for JsonRecentStore {
    fn load(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "recent store unreadable");
                return Ok(BTreeMap::new());
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(map) => Ok(map),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "recent store corrupted; starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn record(&self, key: &str, at: DateTime<Local>) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), at.format(TIMESTAMP_FORMAT).to_string());
        write_json_atomic(&self.path, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 14, hour, 30, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecentStore::new(dir.path().join("recent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn record_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecentStore::new(dir.path().join("recent.json"));

        store.record("books/algebra.pdf", at(9)).unwrap();
        store.record("books/topology.pdf", at(10)).unwrap();
        store.record("books/algebra.pdf", at(11)).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            store.last_opened("books/algebra.pdf").unwrap().as_deref(),
            Some("2025-03-14 11:30:00")
        );
    }

    #[test]
    fn corrupted_file_is_replaced_on_next_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = JsonRecentStore::new(&path);
        assert!(store.load().unwrap().is_empty());

        store.record("a.pdf", at(8)).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}

//! Cash-flow record repository for JSON storage
//!
//! Manages loading and saving records to records.json, and reading record
//! files supplied from elsewhere.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CashflowError;
use crate::models::CashFlowRecord;

use super::file_io::{read_json, read_json_required, write_json_atomic};

/// Serializable record data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RecordData {
    records: Vec<CashFlowRecord>,
}

/// Accepted shapes of an external record file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Bare(Vec<CashFlowRecord>),
    Wrapped(RecordData),
}

/// Read records from any JSON file
///
/// Accepts a bare array of records or an object with a `records` array.
pub fn read_records_file(path: &Path) -> Result<Vec<CashFlowRecord>, CashflowError> {
    let file: RecordFile = read_json_required(path)?;
    let records = match file {
        RecordFile::Bare(records) => records,
        RecordFile::Wrapped(data) => data.records,
    };
    debug!(path = %path.display(), count = records.len(), "Read cash-flow records");
    Ok(records)
}

/// Repository for record persistence
pub struct RecordRepository {
    path: PathBuf,
    data: RwLock<Vec<CashFlowRecord>>,
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load records from disk; a missing file means no records
    pub fn load(&self) -> Result<(), CashflowError> {
        let file_data: RecordData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            CashflowError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        debug!(path = %self.path.display(), count = file_data.records.len(), "Loaded record store");
        *data = file_data.records;
        Ok(())
    }

    /// Save records to disk, oldest first
    pub fn save(&self) -> Result<(), CashflowError> {
        let data = self.data.read().map_err(|e| {
            CashflowError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut records = data.clone();
        // Stable sort keeps entry order within a day; undated records sink to the end
        records.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        write_json_atomic(&self.path, &RecordData { records })
    }

    /// Get all records in stored order
    pub fn get_all(&self) -> Result<Vec<CashFlowRecord>, CashflowError> {
        let data = self.data.read().map_err(|e| {
            CashflowError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Get records tagged with `property` (case-insensitive)
    pub fn get_by_property(&self, property: &str) -> Result<Vec<CashFlowRecord>, CashflowError> {
        let data = self.data.read().map_err(|e| {
            CashflowError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().filter(|r| r.belongs_to(property)).cloned().collect())
    }

    /// Append a record
    pub fn insert(&self, record: CashFlowRecord) -> Result<(), CashflowError> {
        self.extend(std::iter::once(record)).map(|_| ())
    }

    /// Append records, returning how many were added
    pub fn extend<I>(&self, records: I) -> Result<usize, CashflowError>
    where
        I: IntoIterator<Item = CashFlowRecord>,
    {
        let mut data = self.data.write().map_err(|e| {
            CashflowError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let before = data.len();
        data.extend(records);
        Ok(data.len() - before)
    }

    pub fn count(&self) -> Result<usize, CashflowError> {
        let data = self.data.read().map_err(|e| {
            CashflowError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn record(timestamp: &str, income: i64) -> CashFlowRecord {
        CashFlowRecord::new(
            timestamp,
            Money::from_cents(income),
            Money::zero(),
            Money::zero(),
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecordRepository::new(temp_dir.path().join("records.json"));

        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");

        let repo = RecordRepository::new(path.clone());
        repo.insert(record("2024-03-01", 300)).unwrap();
        repo.insert(CashFlowRecord::default()).unwrap();
        repo.insert(record("2024-01-01", 100).with_property("Elm St"))
            .unwrap();
        repo.save().unwrap();

        let reloaded = RecordRepository::new(path);
        reloaded.load().unwrap();
        let records = reloaded.get_all().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp.as_deref(), Some("2024-01-01"));
        assert_eq!(records[1].timestamp.as_deref(), Some("2024-03-01"));
        assert!(records[2].timestamp.is_none());
        assert_eq!(reloaded.get_by_property("elm st").unwrap().len(), 1);
    }

    #[test]
    fn test_extend_reports_added_count() {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecordRepository::new(temp_dir.path().join("records.json"));

        let added = repo
            .extend(vec![record("2024-01-01", 1), record("2024-01-02", 2)])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_read_records_file_shapes() {
        let temp_dir = TempDir::new().unwrap();

        let bare = temp_dir.path().join("bare.json");
        std::fs::write(&bare, r#"[{"timestamp":"2024-03-05","income":"1000"}]"#).unwrap();
        assert_eq!(read_records_file(&bare).unwrap().len(), 1);

        let wrapped = temp_dir.path().join("wrapped.json");
        std::fs::write(
            &wrapped,
            r#"{"records":[{"timestamp":"2024-03-05"},{"income":5}]}"#,
        )
        .unwrap();
        assert_eq!(read_records_file(&wrapped).unwrap().len(), 2);
    }

    #[test]
    fn test_read_records_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_records_file(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}

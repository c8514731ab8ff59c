//! Storage layer for the cash-flow CLI
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_json_atomic};
pub use records::{read_records_file, RecordRepository};

use crate::config::paths::CashflowPaths;
use crate::error::CashflowError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CashflowPaths,
    pub records: RecordRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: CashflowPaths) -> Result<Self, CashflowError> {
        paths.ensure_directories()?;

        Ok(Self {
            records: RecordRepository::new(paths.records_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &CashflowPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), CashflowError> {
        self.records.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), CashflowError> {
        self.records.save()
    }
}

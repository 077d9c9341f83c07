//! # In-memory Record Store
//!
//! Process-local tables. Reads and writes can be switched to fail, which
//! is how persistence failures are exercised without a real medium.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::backend::{validate_table_name, RecordStore};
use super::errors::{StoreError, StoreResult};
use super::Record;

/// Record store keeping every table in memory
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with `StoreError::Unavailable`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with `StoreError::Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Names of all tables written so far, sorted
    pub fn table_names(&self) -> StoreResult<Vec<String>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl RecordStore for MemoryRecordStore {
    fn read(&self, table: &str) -> StoreResult<Vec<Record>> {
        validate_table_name(table)?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "memory store refused read of '{}'",
                table
            )));
        }
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    fn write(&self, table: &str, records: &[Record]) -> StoreResult<()> {
        validate_table_name(table)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "memory store refused write of '{}'",
                table
            )));
        }
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        tables.insert(table.to_string(), records.to_vec());
        Ok(())
    }

    fn contains(&self, table: &str) -> StoreResult<bool> {
        validate_table_name(table)?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "memory store refused lookup of '{}'",
                table
            )));
        }
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(tables.contains_key(table))
    }
}

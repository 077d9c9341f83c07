//! # Record Store Errors
//!
//! Every failure of the persistence medium maps to one of these. They are
//! `Clone` so the query engine can carry them inside a response.

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Medium cannot be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Table name cannot be used as a storage key
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Failed to read table '{table}': {reason}")]
    ReadFailed { table: String, reason: String },

    #[error("Failed to write table '{table}': {reason}")]
    WriteFailed { table: String, reason: String },

    #[error("Serialization failed for table '{table}': {reason}")]
    Serialization { table: String, reason: String },

    /// Checksum or framing mismatch. Never ignored.
    #[error("Table '{table}' is corrupted: {reason}")]
    Corrupted { table: String, reason: String },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "STAFFBOARD_STORE_UNAVAILABLE",
            StoreError::InvalidTableName(_) => "STAFFBOARD_STORE_INVALID_TABLE",
            StoreError::ReadFailed { .. } => "STAFFBOARD_STORE_READ_FAILED",
            StoreError::WriteFailed { .. } => "STAFFBOARD_STORE_WRITE_FAILED",
            StoreError::Serialization { .. } => "STAFFBOARD_STORE_SERIALIZATION",
            StoreError::Corrupted { .. } => "STAFFBOARD_DATA_CORRUPTION",
            StoreError::LockPoisoned(_) => "STAFFBOARD_STORE_LOCK_POISONED",
        }
    }

    pub(crate) fn read_failed(table: &str, reason: impl ToString) -> Self {
        StoreError::ReadFailed {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failed(table: &str, reason: impl ToString) -> Self {
        StoreError::WriteFailed {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn corrupted(table: &str, reason: impl ToString) -> Self {
        StoreError::Corrupted {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
}

//! # Record Store Trait

use super::errors::StoreResult;
use super::Record;

/// Durable mapping from a table name to its ordered records.
///
/// Implementations replace whole tables; there are no partial writes.
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Read a table's full contents. A never-written table reads as empty.
    fn read(&self, table: &str) -> StoreResult<Vec<Record>>;

    /// Replace a table's full contents.
    fn write(&self, table: &str, records: &[Record]) -> StoreResult<()>;

    /// Whether the table key has ever been written (even if now empty).
    fn contains(&self, table: &str) -> StoreResult<bool>;
}

/// Table names double as storage keys and file stems.
pub(crate) fn validate_table_name(table: &str) -> StoreResult<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(super::StoreError::InvalidTableName(table.to_string()))
    }
}

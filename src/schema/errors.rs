//! Schema error types
//!
//! Schema errors reject a single request; they never affect stored data.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Table name is not one of the persisted tables
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Row does not fit the table's record shape
    #[error("Invalid {table} record: {reason}")]
    InvalidRecord { table: String, reason: String },

    /// Typed access requested for a different table than the row came from
    #[error("Expected rows of table '{expected}', got '{found}'")]
    TableMismatch { expected: String, found: String },
}

impl SchemaError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownTable(_) => "STAFFBOARD_SCHEMA_UNKNOWN_TABLE",
            SchemaError::InvalidRecord { .. } => "STAFFBOARD_SCHEMA_VALIDATION_FAILED",
            SchemaError::TableMismatch { .. } => "STAFFBOARD_SCHEMA_TABLE_MISMATCH",
        }
    }

    pub(crate) fn invalid(table: impl ToString, reason: impl ToString) -> Self {
        SchemaError::InvalidRecord {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
}

//! # Query Errors
//!
//! Everything that can go wrong while executing a request. These never
//! escape as `Err` from the engine; they land in `QueryResponse::error`.

use thiserror::Error;

use super::builder::Action;
use crate::schema::{SchemaError, Table};
use crate::store::StoreError;

/// Result type for query execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Persistence medium failed
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Unknown table or a row that does not fit its table
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Action requires a payload and none was given
    #[error("{0} requires a payload")]
    MissingPayload(Action),

    #[error("Invalid {action} payload: {reason}")]
    InvalidPayload { action: Action, reason: String },

    /// Write would give two rows the same id
    #[error("Duplicate id '{id}' in table {table}")]
    DuplicateId { table: Table, id: String },

    /// Write to `app_targets` aimed at a row other than id 1
    #[error("app_targets holds a single row with id 1; got id {0}")]
    SingletonViolation(String),

    #[error("Lock poisoned for table {0}")]
    LockPoisoned(Table),
}

impl QueryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Store(e) => e.code(),
            QueryError::Schema(e) => e.code(),
            QueryError::MissingPayload(_) => "STAFFBOARD_QUERY_MISSING_PAYLOAD",
            QueryError::InvalidPayload { .. } => "STAFFBOARD_QUERY_INVALID_PAYLOAD",
            QueryError::DuplicateId { .. } => "STAFFBOARD_QUERY_DUPLICATE_ID",
            QueryError::SingletonViolation(_) => "STAFFBOARD_QUERY_SINGLETON_VIOLATION",
            QueryError::LockPoisoned(_) => "STAFFBOARD_QUERY_LOCK_POISONED",
        }
    }
}

//! Record Store subsystem for staffboard
//!
//! Holds the canonical persisted contents of every table. The store knows
//! nothing about schemas or queries: it loads and replaces whole tables.
//!
//! # Backends
//!
//! - [`FileRecordStore`]: one checksummed JSON file per table, atomic replace
//! - [`MemoryRecordStore`]: process-local, with failure injection

mod backend;
mod errors;
mod file;
mod memory;

pub use backend::RecordStore;
pub use errors::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

/// A persisted row: field name to JSON value. Always carries `id` once stored.
pub type Record = serde_json::Map<String, serde_json::Value>;

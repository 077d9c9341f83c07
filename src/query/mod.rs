//! # Query subsystem
//!
//! Fluent, deferred-execution queries over the record store.
//!
//! ```ignore
//! let latest = client
//!     .table("kpi_entries")
//!     .select()
//!     .eq("user_id", "u2")
//!     .order("date", false)
//!     .limit(1)
//!     .await;
//! ```

pub mod builder;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod response;

pub use builder::{Action, QueryBuilder, QueryRequest, TableQuery};
pub use engine::Engine;
pub use errors::{QueryError, QueryResult};
pub use filter::{loose_eq, Filter, FilterOp, OrderBy};
pub use response::{QueryData, QueryResponse};

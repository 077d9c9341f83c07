//! staffboard - embedded record store and query builder for the staff KPI
//! dashboard
//!
//! Application code asks a [`Client`] for a table, chains an action with
//! filters and modifiers, and awaits a `{data, error}` response. Tables
//! persist through a [`store::RecordStore`] that is seeded once with the
//! dashboard's default data.
//!
//! ```ignore
//! let client = Client::in_memory()?;
//! let latest = client
//!     .table("kpi_entries")
//!     .select()
//!     .eq("user_id", "u2")
//!     .order("date", false)
//!     .limit(1)
//!     .await;
//! ```

pub mod audit;
pub mod cli;
pub mod client;
pub mod config;
pub mod observability;
pub mod query;
pub mod realtime;
pub mod schema;
pub mod seed;
pub mod store;

pub use audit::AuditTrail;
pub use client::{Client, ClientError, ClientOptions, ClientResult};
pub use config::{BackendKind, ConfigError, StoreConfig};
pub use query::{QueryBuilder, QueryData, QueryError, QueryRequest, QueryResponse, TableQuery};
pub use schema::Table;

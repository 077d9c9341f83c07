//! Schema subsystem for staffboard
//!
//! Names the persisted tables and gives each one a concrete record struct.
//! Rows are stored as JSON objects; every row written through a query is
//! validated against its table's struct first.

mod errors;
mod naming;
mod table;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use naming::{camel_to_snake, to_persisted_keys, value_to_persisted_keys};
pub use table::{Table, SINGLETON_ID};
pub use types::{
    AppTargets, AppUser, AuditLogEntry, BonusMetric, BonusPeriod, BonusRule, KpiEntry, Role,
    TableRecord, TableRow,
};
pub use validator::{decode_row, validate_record};

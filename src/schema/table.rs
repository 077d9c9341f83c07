//! Table names

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SchemaError;

/// Identifier of the `app_targets` singleton row
pub const SINGLETON_ID: u64 = 1;

/// The persisted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    AppUsers,
    AppTargets,
    BonusRules,
    KpiEntries,
    AuditLogs,
}

impl Table {
    /// Every table, in a fixed order
    pub const ALL: [Table; 5] = [
        Table::AppUsers,
        Table::AppTargets,
        Table::BonusRules,
        Table::KpiEntries,
        Table::AuditLogs,
    ];

    /// Storage key of the table
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::AppUsers => "app_users",
            Table::AppTargets => "app_targets",
            Table::BonusRules => "bonus_rules",
            Table::KpiEntries => "kpi_entries",
            Table::AuditLogs => "audit_logs",
        }
    }

    /// Parse a storage key
    pub fn parse(name: &str) -> Result<Self, SchemaError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    /// `app_targets` holds exactly one row with `id = 1`.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Table::AppTargets)
    }

    /// Position in [`Table::ALL`]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Table {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_names() {
        for table in Table::ALL {
            assert_eq!(Table::parse(table.as_str()).unwrap(), table);
        }
    }

    #[test]
    fn test_unknown_table() {
        assert_eq!(
            "orders".parse::<Table>(),
            Err(SchemaError::UnknownTable("orders".into()))
        );
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, table) in Table::ALL.iter().enumerate() {
            assert_eq!(table.index(), i);
        }
    }

    #[test]
    fn test_only_targets_is_singleton() {
        assert!(Table::AppTargets.is_singleton());
        assert!(!Table::KpiEntries.is_singleton());
    }
}

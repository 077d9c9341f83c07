//! # Change Events
//!
//! Shapes a listener would receive if delivery existed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Which row changes a listener is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    /// Any of the above
    #[serde(rename = "*")]
    All,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Insert => write!(f, "INSERT"),
            ChangeKind::Update => write!(f, "UPDATE"),
            ChangeKind::Delete => write!(f, "DELETE"),
            ChangeKind::All => write!(f, "*"),
        }
    }
}

/// A row change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePayload {
    pub kind: ChangeKind,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Record>,
    pub commit_timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_value(ChangeKind::All).unwrap(), "*");
        assert_eq!(serde_json::to_value(ChangeKind::Update).unwrap(), "UPDATE");
        assert_eq!(ChangeKind::Delete.to_string(), "DELETE");
    }
}

//! Audit trail
//!
//! One `audit_logs` row per significant mutation. Written through the
//! query vocabulary like any other collaborator.

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::client::Client;
use crate::query::QueryResponse;
use crate::schema::Table;

/// Writes and reads audit rows
#[derive(Debug, Clone, Copy)]
pub struct AuditTrail<'a> {
    client: &'a Client,
}

impl<'a> AuditTrail<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Append one audit row stamped with the current UTC time.
    pub async fn record(&self, action: &str, user_name: &str, details: &str) -> QueryResponse {
        // Millisecond RFC 3339 in UTC sorts lexically in time order
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.client
            .table(Table::AuditLogs)
            .insert(json!({
                "action": action,
                "user_name": user_name,
                "details": details,
                "created_at": created_at,
            }))
            .await
    }

    /// Newest entries first
    pub async fn recent(&self, limit: usize) -> QueryResponse {
        self.client
            .table(Table::AuditLogs)
            .select()
            .order("created_at", false)
            .limit(limit)
            .await
    }

    /// Entries written by one user, newest first
    pub async fn by_user(&self, user_name: &str) -> QueryResponse {
        self.client
            .table(Table::AuditLogs)
            .select()
            .eq("user_name", user_name)
            .order("created_at", false)
            .await
    }
}

//! Per-table record shapes
//!
//! Each table has a concrete struct with its own field set and serde
//! representation. [`TableRecord`] is the tagged variant selected by
//! [`Table`] when a raw row crosses the query boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::table::Table;

/// A struct that is the record shape of exactly one table
pub trait TableRow: Serialize + for<'de> Deserialize<'de> {
    const TABLE: Table;
}

/// Accept `"u2"` or `2` for identifier fields; both become a string.
///
/// Rows written by different callers do not agree on id typing, and the
/// filters already compare ids loosely.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number identifier, got {}",
            other
        ))),
    }
}

/// Dashboard role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

/// `app_users` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Stored as plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TableRow for AppUser {
    const TABLE: Table = Table::AppUsers;
}

/// `app_targets` singleton row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppTargets {
    pub id: u64,
    pub monthly_sales_amount: f64,
    pub monthly_devices: f64,
    /// Percent, 0-100
    pub daily_conversion: f64,
    pub daily_follow_ups: f64,
    pub max_errors: f64,
}

impl TableRow for AppTargets {
    const TABLE: Table = Table::AppTargets;
}

/// What a bonus rule measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BonusMetric {
    Amount,
    Conversion,
    Devices,
    Score,
    FollowUps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusPeriod {
    Monthly,
}

/// `bonus_rules` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRule {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub metric: BonusMetric,
    pub threshold: f64,
    pub amount: f64,
    pub period: BonusPeriod,
    pub is_active: bool,
}

impl TableRow for BonusRule {
    const TABLE: Table = Table::BonusRules;
}

/// `kpi_entries` row: one user's numbers for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub date: NaiveDate,
    pub clients_attended: f64,
    pub quotes_sent: f64,
    pub follow_ups: f64,
    pub sales_closed: f64,
    pub amount_sold: f64,
    pub devices_sold: f64,
    pub exchanges: f64,
    pub errors: f64,
    /// 1-5
    pub punctuality_score: f64,
    /// 1-5
    pub quality_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TableRow for KpiEntry {
    const TABLE: Table = Table::KpiEntries;
}

/// `audit_logs` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub action: String,
    pub user_name: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl TableRow for AuditLogEntry {
    const TABLE: Table = Table::AuditLogs;
}

/// A decoded row of any table
#[derive(Debug, Clone, PartialEq)]
pub enum TableRecord {
    User(AppUser),
    Targets(AppTargets),
    BonusRule(BonusRule),
    KpiEntry(KpiEntry),
    AuditLog(AuditLogEntry),
}

impl TableRecord {
    /// Table the row belongs to
    pub fn table(&self) -> Table {
        match self {
            TableRecord::User(_) => Table::AppUsers,
            TableRecord::Targets(_) => Table::AppTargets,
            TableRecord::BonusRule(_) => Table::BonusRules,
            TableRecord::KpiEntry(_) => Table::KpiEntries,
            TableRecord::AuditLog(_) => Table::AuditLogs,
        }
    }

    /// Row identifier as text
    pub fn id(&self) -> String {
        match self {
            TableRecord::User(r) => r.id.clone(),
            TableRecord::Targets(r) => r.id.to_string(),
            TableRecord::BonusRule(r) => r.id.clone(),
            TableRecord::KpiEntry(r) => r.id.clone(),
            TableRecord::AuditLog(r) => r.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_user_id_accepted() {
        let entry: KpiEntry = serde_json::from_value(json!({
            "id": 7, "user_id": 2, "date": "2024-01-03",
            "clients_attended": 10, "quotes_sent": 8, "follow_ups": 5,
            "sales_closed": 3, "amount_sold": 4500, "devices_sold": 2,
            "exchanges": 0, "errors": 0, "punctuality_score": 5, "quality_score": 4
        }))
        .unwrap();
        assert_eq!(entry.id, "7");
        assert_eq!(entry.user_id, "2");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_bonus_metric_names() {
        assert_eq!(serde_json::to_value(BonusMetric::FollowUps).unwrap(), json!("followUps"));
        let rule: BonusRule = serde_json::from_value(json!({
            "id": "b9", "name": "Seguimiento", "metric": "followUps",
            "threshold": 300, "amount": 1000, "period": "monthly", "is_active": false
        }))
        .unwrap();
        assert_eq!(rule.metric, BonusMetric::FollowUps);
    }

    #[test]
    fn test_role_rejects_unknown() {
        let result: Result<AppUser, _> =
            serde_json::from_value(json!({"id": "u9", "name": "X", "role": "owner"}));
        assert!(result.is_err());
    }
}

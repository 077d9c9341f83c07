//! Record validation
//!
//! A row is valid when it decodes into its table's struct and its values
//! sit inside the documented ranges. Validation never mutates the row.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::table::{Table, SINGLETON_ID};
use super::types::{
    AppTargets, AppUser, AuditLogEntry, BonusRule, KpiEntry, TableRecord, TableRow,
};
use crate::store::Record;

fn decode<T: DeserializeOwned>(table: Table, record: &Record) -> SchemaResult<T> {
    serde_json::from_value(Value::Object(record.clone()))
        .map_err(|e| SchemaError::invalid(table, e))
}

fn non_negative(table: Table, field: &str, value: f64) -> SchemaResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SchemaError::invalid(
            table,
            format!("{} must be a non-negative number, got {}", field, value),
        ))
    }
}

fn rating(table: Table, field: &str, value: f64) -> SchemaResult<()> {
    if (1.0..=5.0).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::invalid(
            table,
            format!("{} must be between 1 and 5, got {}", field, value),
        ))
    }
}

fn check_targets(row: &AppTargets) -> SchemaResult<()> {
    let table = Table::AppTargets;
    if row.id != SINGLETON_ID {
        return Err(SchemaError::invalid(
            table,
            format!("singleton id must be {}, got {}", SINGLETON_ID, row.id),
        ));
    }
    non_negative(table, "monthly_sales_amount", row.monthly_sales_amount)?;
    non_negative(table, "monthly_devices", row.monthly_devices)?;
    non_negative(table, "daily_follow_ups", row.daily_follow_ups)?;
    non_negative(table, "max_errors", row.max_errors)?;
    if !(0.0..=100.0).contains(&row.daily_conversion) {
        return Err(SchemaError::invalid(
            table,
            format!("daily_conversion is a percentage, got {}", row.daily_conversion),
        ));
    }
    Ok(())
}

fn check_kpi_entry(row: &KpiEntry) -> SchemaResult<()> {
    let table = Table::KpiEntries;
    for (field, value) in [
        ("clients_attended", row.clients_attended),
        ("quotes_sent", row.quotes_sent),
        ("follow_ups", row.follow_ups),
        ("sales_closed", row.sales_closed),
        ("amount_sold", row.amount_sold),
        ("devices_sold", row.devices_sold),
        ("exchanges", row.exchanges),
        ("errors", row.errors),
    ] {
        non_negative(table, field, value)?;
    }
    rating(table, "punctuality_score", row.punctuality_score)?;
    rating(table, "quality_score", row.quality_score)
}

fn check_bonus_rule(row: &BonusRule) -> SchemaResult<()> {
    non_negative(Table::BonusRules, "threshold", row.threshold)?;
    non_negative(Table::BonusRules, "amount", row.amount)
}

/// Decode and range-check a persisted-convention row for `table`.
pub fn validate_record(table: Table, record: &Record) -> SchemaResult<TableRecord> {
    match table {
        Table::AppUsers => decode::<AppUser>(table, record).map(TableRecord::User),
        Table::AppTargets => {
            let row: AppTargets = decode(table, record)?;
            check_targets(&row)?;
            Ok(TableRecord::Targets(row))
        }
        Table::BonusRules => {
            let row: BonusRule = decode(table, record)?;
            check_bonus_rule(&row)?;
            Ok(TableRecord::BonusRule(row))
        }
        Table::KpiEntries => {
            let row: KpiEntry = decode(table, record)?;
            check_kpi_entry(&row)?;
            Ok(TableRecord::KpiEntry(row))
        }
        Table::AuditLogs => decode::<AuditLogEntry>(table, record).map(TableRecord::AuditLog),
    }
}

/// Decode a row into a specific table struct, checking the source table.
pub fn decode_row<T: TableRow>(source: Table, record: &Record) -> SchemaResult<T> {
    if source != T::TABLE {
        return Err(SchemaError::TableMismatch {
            expected: T::TABLE.to_string(),
            found: source.to_string(),
        });
    }
    decode(source, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn kpi(quality: f64) -> Record {
        record(json!({
            "id": "u2-2024-01-01", "user_id": "u2", "date": "2024-01-01",
            "clients_attended": 20, "quotes_sent": 16, "follow_ups": 9,
            "sales_closed": 5, "amount_sold": 6000, "devices_sold": 3,
            "exchanges": 0, "errors": 0, "punctuality_score": 5, "quality_score": quality
        }))
    }

    #[test]
    fn test_valid_kpi_entry() {
        let decoded = validate_record(Table::KpiEntries, &kpi(4.0)).unwrap();
        assert_eq!(decoded.table(), Table::KpiEntries);
        assert_eq!(decoded.id(), "u2-2024-01-01");
    }

    #[test]
    fn test_rating_out_of_range() {
        let err = validate_record(Table::KpiEntries, &kpi(7.0)).unwrap_err();
        assert!(err.to_string().contains("quality_score"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = validate_record(Table::AppUsers, &record(json!({"id": "u9"}))).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRecord { .. }));
    }

    #[test]
    fn test_targets_singleton_id_enforced() {
        let row = record(json!({
            "id": 2, "monthly_sales_amount": 1, "monthly_devices": 1,
            "daily_conversion": 30, "daily_follow_ups": 15, "max_errors": 0
        }));
        assert!(validate_record(Table::AppTargets, &row).is_err());
    }

    #[test]
    fn test_decode_row_checks_table() {
        let err = decode_row::<AppUser>(Table::KpiEntries, &kpi(4.0)).unwrap_err();
        assert!(matches!(err, SchemaError::TableMismatch { .. }));

        let entry = decode_row::<KpiEntry>(Table::KpiEntries, &kpi(4.0)).unwrap();
        assert_eq!(entry.user_id, "u2");
    }
}

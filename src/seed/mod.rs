//! Seed Bootstrapper
//!
//! Populates each fixture table exactly once. A table is seeded only when
//! its key is absent from the store; a table that exists but is empty was
//! emptied on purpose and is left alone.

mod fixtures;

pub use fixtures::{fixture_for, HISTORY_DAYS};

use chrono::NaiveDate;
use serde::Serialize;

use crate::observability::{log_event, Event, Severity};
use crate::schema::{to_persisted_keys, Table};
use crate::store::{Record, RecordStore, StoreResult};

/// Outcome of one bootstrap pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Tables that received their fixture
    pub seeded: Vec<Table>,
    /// Fixture tables that already existed
    pub skipped: Vec<Table>,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.seeded.is_empty()
    }
}

/// Write fixtures into every absent fixture table.
pub fn bootstrap(store: &dyn RecordStore, anchor: NaiveDate) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    for table in Table::ALL {
        let Some(rows) = fixture_for(table, anchor) else {
            continue;
        };

        if store.contains(table.as_str())? {
            log_event(Severity::Info, Event::SeedSkipped, &[("table", table.as_str())]);
            report.skipped.push(table);
            continue;
        }

        let records: Vec<Record> = rows
            .into_iter()
            .filter_map(|row| match row {
                serde_json::Value::Object(map) => Some(to_persisted_keys(map)),
                _ => None,
            })
            .collect();

        store.write(table.as_str(), &records)?;
        log_event(
            Severity::Info,
            Event::SeedApplied,
            &[("table", table.as_str()), ("rows", &records.len().to_string())],
        );
        report.seeded.push(table);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_record;
    use crate::store::MemoryRecordStore;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    #[test]
    fn test_seeds_absent_tables() {
        let store = MemoryRecordStore::new();
        let report = bootstrap(&store, anchor()).unwrap();

        assert_eq!(
            report.seeded,
            vec![Table::AppUsers, Table::AppTargets, Table::BonusRules, Table::KpiEntries]
        );
        assert!(!store.contains("audit_logs").unwrap());

        let targets = store.read("app_targets").unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0]["monthly_sales_amount"], 450000);
        assert!(targets[0].get("monthlySalesAmount").is_none());
    }

    #[test]
    fn test_every_fixture_row_is_valid() {
        let store = MemoryRecordStore::new();
        bootstrap(&store, anchor()).unwrap();

        for table in [Table::AppUsers, Table::AppTargets, Table::BonusRules, Table::KpiEntries] {
            for row in store.read(table.as_str()).unwrap() {
                validate_record(table, &row).unwrap();
            }
        }
    }

    #[test]
    fn test_second_pass_is_noop() {
        let store = MemoryRecordStore::new();
        bootstrap(&store, anchor()).unwrap();
        let before = store.read("kpi_entries").unwrap().len();

        let report = bootstrap(&store, anchor()).unwrap();
        assert!(report.is_noop());
        assert_eq!(report.skipped.len(), 4);
        assert_eq!(store.read("kpi_entries").unwrap().len(), before);
    }

    #[test]
    fn test_present_but_empty_is_not_reseeded() {
        let store = MemoryRecordStore::new();
        store.write("bonus_rules", &[]).unwrap();

        let report = bootstrap(&store, anchor()).unwrap();
        assert!(report.skipped.contains(&Table::BonusRules));
        assert!(store.read("bonus_rules").unwrap().is_empty());
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = MemoryRecordStore::new();
        store.fail_writes(true);
        assert!(bootstrap(&store, anchor()).is_err());
    }
}

//! Default dataset for a fresh installation
//!
//! Fixtures are written in the dashboard's camelCase vocabulary and are
//! converted to persisted field names by the bootstrapper.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::schema::{Table, SINGLETON_ID};

/// Fixed RNG seed for the KPI history
const HISTORY_SEED: u64 = 0x5EED_CAFE;

/// Days of history per staff member, ending at the anchor date
pub const HISTORY_DAYS: u64 = 7;

fn users() -> Vec<Value> {
    vec![
        json!({"id": "u1", "name": "Laura Gerente", "role": "admin", "avatar": "https://picsum.photos/id/64/200/200", "password": "admin"}),
        json!({"id": "u2", "name": "Ana Vendedora", "role": "staff", "avatar": "https://picsum.photos/id/65/200/200", "password": "123"}),
        json!({"id": "u3", "name": "Carla Asesora", "role": "staff", "avatar": "https://picsum.photos/id/66/200/200", "password": "123"}),
        json!({"id": "u4", "name": "Beatriz Ventas", "role": "staff", "avatar": "https://picsum.photos/id/67/200/200", "password": "123"}),
    ]
}

fn targets() -> Vec<Value> {
    vec![json!({
        "id": SINGLETON_ID,
        "monthlySalesAmount": 450000,
        "monthlyDevices": 60,
        "dailyConversion": 30,
        "dailyFollowUps": 15,
        "maxErrors": 0
    })]
}

fn bonus_rules() -> Vec<Value> {
    vec![
        json!({"id": "b1", "name": "Bono Master en Ventas", "metric": "amount", "threshold": 400000, "amount": 5000, "period": "monthly", "isActive": true}),
        json!({"id": "b2", "name": "Bono Alta Conversión", "metric": "conversion", "threshold": 35, "amount": 3000, "period": "monthly", "isActive": true}),
        json!({"id": "b3", "name": "Bono Calidad Total", "metric": "score", "threshold": 90, "amount": 2000, "period": "monthly", "isActive": true}),
        json!({"id": "b4", "name": "Bono Equipos", "metric": "devices", "threshold": 55, "amount": 2500, "period": "monthly", "isActive": true}),
    ]
}

/// Seven days per staff user, oldest first, deterministic for a given anchor.
fn kpi_history(anchor: NaiveDate) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(HISTORY_SEED);
    let mut entries = Vec::new();

    let staff = users()
        .into_iter()
        .filter(|u| u["role"] == "staff")
        .filter_map(|u| u["id"].as_str().map(str::to_string));

    for user_id in staff {
        for offset in (0..HISTORY_DAYS).rev() {
            let Some(day) = anchor.checked_sub_days(Days::new(offset)) else {
                continue;
            };
            let date = day.format("%Y-%m-%d").to_string();

            let clients: u64 = rng.gen_range(10..30);
            let sales = (clients as f64 * rng.gen_range(0.1..0.5)).floor() as u64;
            let devices = (sales as f64 * 0.7).floor() as u64;
            let ticket: u64 = rng.gen_range(500..1500);

            entries.push(json!({
                "id": format!("{}-{}", user_id, date),
                "userId": user_id,
                "date": date,
                "clientsAttended": clients,
                "quotesSent": (clients as f64 * 0.8).floor() as u64,
                "followUps": rng.gen_range(5..20u64),
                "salesClosed": sales,
                "amountSold": sales * ticket,
                "devicesSold": devices,
                "exchanges": u64::from(rng.gen::<f64>() > 0.8),
                "errors": u64::from(rng.gen::<f64>() > 0.9),
                "punctualityScore": if rng.gen::<f64>() > 0.1 { 5 } else { 4 },
                "qualityScore": rng.gen_range(4..=5u64),
            }));
        }
    }
    entries
}

/// Fixture rows for a table, or `None` when the table starts empty.
pub fn fixture_for(table: Table, anchor: NaiveDate) -> Option<Vec<Value>> {
    match table {
        Table::AppUsers => Some(users()),
        Table::AppTargets => Some(targets()),
        Table::BonusRules => Some(bonus_rules()),
        Table::KpiEntries => Some(kpi_history(anchor)),
        Table::AuditLogs => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_history_is_deterministic() {
        assert_eq!(kpi_history(anchor()), kpi_history(anchor()));
    }

    #[test]
    fn test_history_shape() {
        let history = kpi_history(anchor());
        assert_eq!(history.len(), 3 * HISTORY_DAYS as usize);
        assert_eq!(history[0]["id"], "u2-2024-03-04");
        assert_eq!(history[6]["date"], "2024-03-10");
        assert!(history.iter().all(|e| e["userId"] != "u1"));
    }

    #[test]
    fn test_audit_logs_have_no_fixture() {
        assert!(fixture_for(Table::AuditLogs, anchor()).is_none());
        assert_eq!(fixture_for(Table::AppTargets, anchor()).unwrap().len(), 1);
    }
}

//! Field-name conventions
//!
//! Fixtures and callers may use camelCase keys (`monthlySalesAmount`);
//! persisted rows always use snake_case (`monthly_sales_amount`).

use serde_json::Value;

use crate::store::Record;

/// Convert a camelCase identifier to snake_case. Already-snake input is unchanged.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrite the top-level keys of a record to snake_case. Values are untouched.
pub fn to_persisted_keys(record: Record) -> Record {
    record
        .into_iter()
        .map(|(key, value)| (camel_to_snake(&key), value))
        .collect()
}

/// Same as [`to_persisted_keys`] for a JSON object value; other values pass through.
pub fn value_to_persisted_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(to_persisted_keys(map)),
        other => other,
    }
}

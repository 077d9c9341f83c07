//! # Filter and Ordering
//!
//! Filters are `(field, op, value)` triples combined with AND. Equality is
//! loose: `5` matches `"5"`, `true` matches `"true"`. Rows reach the store
//! from callers that disagree on identifier typing, and a strict match
//! would silently drop them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Record;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    /// Loosely equal
    #[serde(rename = "eq")]
    Eq,

    /// Not loosely equal
    #[serde(rename = "neq")]
    Neq,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
        }
    }
}

/// A single predicate on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn neq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Neq, value)
    }

    /// Check a row against this predicate.
    ///
    /// A missing field never equals anything, so `neq` matches it.
    pub fn matches(&self, record: &Record) -> bool {
        let equal = match record.get(&self.field) {
            Some(field_value) => loose_eq(field_value, &self.value),
            None => false,
        };
        match self.op {
            FilterOp::Eq => equal,
            FilterOp::Neq => !equal,
        }
    }
}

/// True when the row satisfies every filter. No filters match everything.
pub fn matches_all(filters: &[Filter], record: &Record) -> bool {
    filters.iter().all(|f| f.matches(record))
}

/// Ordering of a result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl OrderBy {
    pub fn new(field: impl Into<String>, ascending: bool) -> Self {
        Self {
            field: field.into(),
            ascending,
        }
    }

    /// Stable in-place sort. Ties keep their stored order, and rows without
    /// the field stay last in either direction.
    pub fn apply(&self, records: &mut [Record]) {
        records.sort_by(|a, b| {
            compare_values(a.get(&self.field), b.get(&self.field), self.ascending)
        });
    }
}

/// Numeric view of a value: numbers, and strings that parse as numbers.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Loose equality between a stored value and a filter value.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::String(s)) | (Value::String(s), Value::Bool(x)) => {
            s.trim() == if *x { "true" } else { "false" }
        }
        (Value::Number(_), _) | (_, Value::Number(_)) | (Value::Bool(_), Value::Bool(_)) => {
            match (as_number(a), as_number(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        _ => a == b,
    }
}

/// Canonical text form of an identifier, so `5`, `5.0` and `"5"` collide.
pub fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some(format!("{}", f as i64)),
            _ => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

/// Sort position of a present value.
///
/// Ranked by kind first: booleans, then numbers (including strings that
/// parse as numbers), then other text, then arrays and objects by their
/// JSON text. Every value has exactly one key, so the order is total.
#[derive(Debug)]
enum SortKey {
    Bool(bool),
    Number(f64),
    Text(String),
    Composite(String),
}

impl SortKey {
    fn of(value: &Value) -> Self {
        match value {
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Number(_) => SortKey::Number(as_number(value).unwrap_or(0.0)),
            Value::String(s) => match as_number(value) {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(s.clone()),
            },
            other => SortKey::Composite(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Composite(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(y),
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
            (SortKey::Composite(x), SortKey::Composite(y)) => x.cmp(y),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two optional field values for sorting in the given direction.
///
/// Absent or null values sort after present ones whether ascending or not;
/// only present values are affected by the direction.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, ascending: bool) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(x), Some(y)) => {
            let cmp = SortKey::of(x).compare(&SortKey::of(y));
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        }
    }
}

//! # Execution Engine
//!
//! Interprets a [`QueryRequest`] against the record store. Each request
//! holds its table's lock for the whole read-modify-write cycle, and every
//! failure is folded into the response instead of being returned.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use uuid::Uuid;

use super::builder::{Action, QueryRequest};
use super::errors::{QueryError, QueryResult};
use super::filter::{id_key, matches_all, Filter};
use super::response::{QueryData, QueryResponse};
use crate::observability::{log_event, Event, Severity};
use crate::schema::{validate_record, Table, SINGLETON_ID};
use crate::store::{Record, RecordStore};

/// Runs requests against a shared record store
#[derive(Debug)]
pub struct Engine {
    store: Arc<dyn RecordStore>,
    /// One writer at a time per table, indexed like `Table::ALL`
    locks: [Mutex<()>; 5],
}

impl Engine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            locks: Default::default(),
        }
    }

    /// Execute a request. Never panics on bad input, never returns `Err`.
    pub fn execute(&self, request: QueryRequest) -> QueryResponse {
        let Some(action) = request.action else {
            return QueryResponse::empty();
        };
        let table_name = request.table.clone();

        match self.run(action, request) {
            Ok((table, data)) => {
                let rows = data.as_ref().map_or(0, |d| match d {
                    QueryData::Rows(rows) => rows.len(),
                    QueryData::Row(_) => 1,
                });
                log_event(
                    Severity::Trace,
                    Event::QueryExecuted,
                    &[
                        ("action", action.as_str()),
                        ("rows", &rows.to_string()),
                        ("table", &table_name),
                    ],
                );
                QueryResponse::ok(table, data)
            }
            Err(e) => {
                log_event(
                    Severity::Error,
                    Event::QueryFailed,
                    &[
                        ("action", action.as_str()),
                        ("code", e.code()),
                        ("error", &e.to_string()),
                        ("table", &table_name),
                    ],
                );
                QueryResponse::failed(e)
            }
        }
    }

    fn run(&self, action: Action, request: QueryRequest) -> QueryResult<(Table, Option<QueryData>)> {
        let table = Table::parse(&request.table)?;
        let _guard = self.locks[table.index()]
            .lock()
            .map_err(|_| QueryError::LockPoisoned(table))?;

        let data = match action {
            Action::Select => self.select(table, &request)?,
            Action::Insert => {
                let rows = normalize_payload(action, request.payload)?;
                Some(QueryData::Rows(self.insert(table, rows)?))
            }
            Action::Upsert => {
                let rows = normalize_payload(action, request.payload)?;
                Some(QueryData::Rows(self.upsert(table, rows)?))
            }
            Action::Update => {
                let patch = patch_payload(request.payload)?;
                self.update(table, &request.filters, patch)?;
                None
            }
            Action::Delete => {
                self.delete(table, &request.filters)?;
                None
            }
        };
        Ok((table, data))
    }

    fn persist(&self, table: Table, records: &[Record], action: Action, changed: usize) -> QueryResult<()> {
        self.store.write(table.as_str(), records)?;
        log_event(
            Severity::Info,
            Event::TableWritten,
            &[
                ("action", action.as_str()),
                ("changed", &changed.to_string()),
                ("table", table.as_str()),
                ("total", &records.len().to_string()),
            ],
        );
        Ok(())
    }

    fn select(&self, table: Table, request: &QueryRequest) -> QueryResult<Option<QueryData>> {
        let mut rows: Vec<Record> = self
            .store
            .read(table.as_str())?
            .into_iter()
            .filter(|r| matches_all(&request.filters, r))
            .collect();

        if let Some(order) = &request.order {
            order.apply(&mut rows);
        }
        if let Some(limit) = request.limit {
            rows.truncate(limit);
        }

        if request.single {
            Ok(rows.into_iter().next().map(QueryData::Row))
        } else {
            Ok(Some(QueryData::Rows(rows)))
        }
    }

    fn insert(&self, table: Table, rows: Vec<Record>) -> QueryResult<Vec<Record>> {
        if rows.is_empty() {
            return Ok(rows);
        }
        let mut records = self.store.read(table.as_str())?;
        let mut ids = collect_ids(&records);
        let mut inserted = Vec::with_capacity(rows.len());

        for mut row in rows {
            let id = assign_id(table, &mut row, &ids)?;
            if ids.contains(&id) {
                return Err(QueryError::DuplicateId { table, id });
            }
            validate_record(table, &row)?;
            ids.insert(id);
            inserted.push(row);
        }

        records.extend(inserted.iter().cloned());
        self.persist(table, &records, Action::Insert, inserted.len())?;
        Ok(inserted)
    }

    fn upsert(&self, table: Table, rows: Vec<Record>) -> QueryResult<Vec<Record>> {
        if rows.is_empty() {
            return Ok(rows);
        }
        let mut records = self.store.read(table.as_str())?;
        let mut ids = collect_ids(&records);
        let mut written = Vec::with_capacity(rows.len());

        for mut row in rows {
            let id = assign_id(table, &mut row, &ids)?;
            let existing = records
                .iter()
                .position(|r| r.get("id").and_then(id_key).as_deref() == Some(id.as_str()));

            match existing {
                Some(pos) => {
                    let mut merged = records[pos].clone();
                    // The stored id keeps its original representation
                    let stored_id = merged.get("id").cloned();
                    merged.extend(row.clone());
                    if let Some(stored_id) = stored_id {
                        merged.insert("id".to_string(), stored_id);
                    }
                    validate_record(table, &merged)?;
                    records[pos] = merged;
                }
                None => {
                    validate_record(table, &row)?;
                    ids.insert(id);
                    records.push(row.clone());
                }
            }
            written.push(row);
        }

        self.persist(table, &records, Action::Upsert, written.len())?;
        Ok(written)
    }

    fn update(&self, table: Table, filters: &[Filter], patch: Record) -> QueryResult<usize> {
        let mut records = self.store.read(table.as_str())?;
        let mut changed = 0;

        for record in records.iter_mut().filter(|r| matches_all(filters, r)) {
            let mut merged = record.clone();
            merged.extend(patch.clone());
            validate_record(table, &merged)?;
            *record = merged;
            changed += 1;
        }

        if changed == 0 {
            return Ok(0);
        }
        if patch.contains_key("id") {
            ensure_unique_ids(table, &records)?;
        }
        self.persist(table, &records, Action::Update, changed)?;
        Ok(changed)
    }

    fn delete(&self, table: Table, filters: &[Filter]) -> QueryResult<usize> {
        let mut records = self.store.read(table.as_str())?;
        let before = records.len();
        records.retain(|r| !matches_all(filters, r));
        let removed = before - records.len();

        if removed > 0 {
            self.persist(table, &records, Action::Delete, removed)?;
        }
        Ok(removed)
    }
}

/// Object → one row, array of objects → many rows.
fn normalize_payload(action: Action, payload: Option<Value>) -> QueryResult<Vec<Record>> {
    let invalid = |reason: &str| QueryError::InvalidPayload {
        action,
        reason: reason.to_string(),
    };
    match payload {
        None => Err(QueryError::MissingPayload(action)),
        Some(Value::Object(row)) => Ok(vec![row]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                _ => Err(invalid("every row must be an object")),
            })
            .collect(),
        Some(_) => Err(invalid("expected an object or an array of objects")),
    }
}

fn patch_payload(payload: Option<Value>) -> QueryResult<Record> {
    match payload {
        None => Err(QueryError::MissingPayload(Action::Update)),
        Some(Value::Object(patch)) => Ok(patch),
        Some(_) => Err(QueryError::InvalidPayload {
            action: Action::Update,
            reason: "patch must be an object".to_string(),
        }),
    }
}

fn collect_ids(records: &[Record]) -> HashSet<String> {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(id_key))
        .collect()
}

/// Fill in a missing id and return the row's id key.
///
/// `app_targets` rows always get id 1; anything else is rejected.
fn assign_id(table: Table, row: &mut Record, taken: &HashSet<String>) -> QueryResult<String> {
    let current = row.get("id").and_then(id_key);

    if table.is_singleton() {
        let singleton = SINGLETON_ID.to_string();
        return match current {
            Some(id) if id != singleton => Err(QueryError::SingletonViolation(id)),
            _ => {
                row.insert("id".to_string(), Value::from(SINGLETON_ID));
                Ok(singleton)
            }
        };
    }

    match current {
        Some(id) => Ok(id),
        None => {
            let mut id = Uuid::new_v4().to_string();
            while taken.contains(&id) {
                id = Uuid::new_v4().to_string();
            }
            row.insert("id".to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}

fn ensure_unique_ids(table: Table, records: &[Record]) -> QueryResult<()> {
    let mut seen = HashSet::new();
    for id in records.iter().filter_map(|r| r.get("id").and_then(id_key)) {
        if !seen.insert(id.clone()) {
            return Err(QueryError::DuplicateId { table, id });
        }
    }
    Ok(())
}

//! # Query Response
//!
//! The uniform `{data, error}` pair every request resolves to.

use serde::{Serialize, Serializer};

use super::errors::QueryError;
use crate::schema::{decode_row, Table, TableRow};
use crate::store::Record;

/// Successful payload of a request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryData {
    /// A sequence of rows (select, insert, upsert)
    Rows(Vec<Record>),
    /// One row (select + single)
    Row(Record),
}

/// Result of executing a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub data: Option<QueryData>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<QueryError>,
    #[serde(skip)]
    table: Option<Table>,
}

fn serialize_error<S: Serializer>(error: &Option<QueryError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_some(&e.to_string()),
        None => s.serialize_none(),
    }
}

impl QueryResponse {
    /// `{data: null, error: null}`
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
            table: None,
        }
    }

    pub(crate) fn ok(table: Table, data: Option<QueryData>) -> Self {
        Self {
            data,
            error: None,
            table: Some(table),
        }
    }

    pub(crate) fn failed(error: QueryError) -> Self {
        Self {
            data: None,
            error: Some(error),
            table: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Rows of a sequence result; a single row is returned as a one-element
    /// slice, and no data as an empty slice.
    pub fn rows(&self) -> &[Record] {
        match &self.data {
            Some(QueryData::Rows(rows)) => rows,
            Some(QueryData::Row(row)) => std::slice::from_ref(row),
            None => &[],
        }
    }

    /// The row of a single-row result
    pub fn row(&self) -> Option<&Record> {
        match &self.data {
            Some(QueryData::Row(row)) => Some(row),
            _ => None,
        }
    }

    /// Decode every returned row into `T`.
    pub fn decode_rows<T: TableRow>(&self) -> Result<Vec<T>, QueryError> {
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        let Some(table) = self.table else {
            return Ok(Vec::new());
        };
        self.rows()
            .iter()
            .map(|r| decode_row::<T>(table, r).map_err(QueryError::from))
            .collect()
    }

    /// Decode the single returned row into `T`.
    pub fn decode_row<T: TableRow>(&self) -> Result<Option<T>, QueryError> {
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        match (self.table, self.row()) {
            (Some(table), Some(row)) => Ok(Some(decode_row::<T>(table, row)?)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AppUser;
    use crate::store::StoreError;
    use serde_json::json;

    #[test]
    fn test_empty_serializes_as_nulls() {
        let json = serde_json::to_value(QueryResponse::empty()).unwrap();
        assert_eq!(json, json!({"data": null, "error": null}));
    }

    #[test]
    fn test_error_serializes_as_message() {
        let response =
            QueryResponse::failed(QueryError::Store(StoreError::Unavailable("offline".into())));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["error"], "Storage unavailable: offline");
    }

    #[test]
    fn test_rows_serialize_as_array() {
        let row = json!({"id": "u1"}).as_object().cloned().unwrap();
        let response = QueryResponse::ok(Table::AppUsers, Some(QueryData::Rows(vec![row])));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], json!([{"id": "u1"}]));
    }

    #[test]
    fn test_decode_row() {
        let row = json!({"id": "u2", "name": "Ana Vendedora", "role": "staff"})
            .as_object()
            .cloned()
            .unwrap();
        let response = QueryResponse::ok(Table::AppUsers, Some(QueryData::Row(row)));
        let user: AppUser = response.decode_row().unwrap().unwrap();
        assert_eq!(user.name, "Ana Vendedora");
        assert_eq!(response.rows().len(), 1);
    }
}

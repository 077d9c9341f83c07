//! # Query Builder
//!
//! A request is assembled in two steps:
//!
//! 1. [`TableQuery`] picks exactly one action (`select`, `insert`, ...).
//! 2. [`QueryBuilder`] adds filters and modifiers.
//!
//! Action methods only exist on `TableQuery`, so a builder can never carry
//! two actions. Every method takes `self` and returns the updated value.
//! Nothing reaches the store until the builder is awaited or executed.

use std::fmt;
use std::future::{ready, IntoFuture, Ready};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::engine::Engine;
use super::filter::{Filter, OrderBy};
use super::response::QueryResponse;

/// The one operation a request performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Select,
    Insert,
    Update,
    Upsert,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Select => "select",
            Action::Insert => "insert",
            Action::Update => "update",
            Action::Upsert => "upsert",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete description of one pending operation.
///
/// Holds no table data, only what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub table: String,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub order: Option<OrderBy>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub single: bool,
    /// Row, rows or patch for insert/upsert/update
    #[serde(default)]
    pub payload: Option<Value>,
}

impl QueryRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            action: None,
            filters: Vec::new(),
            order: None,
            limit: None,
            single: false,
            payload: None,
        }
    }
}

/// Entry point for one table: choose an action.
///
/// Awaiting a `TableQuery` without choosing an action resolves to an empty
/// response and never touches the store.
#[must_use = "a query does nothing until it is awaited or executed"]
pub struct TableQuery {
    engine: Arc<Engine>,
    request: QueryRequest,
}

impl TableQuery {
    pub(crate) fn new(engine: Arc<Engine>, table: impl Into<String>) -> Self {
        Self {
            engine,
            request: QueryRequest::new(table),
        }
    }

    fn with_action(self, action: Action, payload: Option<Value>) -> QueryBuilder {
        let mut request = self.request;
        request.action = Some(action);
        request.payload = payload;
        QueryBuilder {
            engine: self.engine,
            request,
        }
    }

    pub fn select(self) -> QueryBuilder {
        self.with_action(Action::Select, None)
    }

    /// Insert one row (object) or many (array).
    pub fn insert(self, rows: Value) -> QueryBuilder {
        self.with_action(Action::Insert, Some(rows))
    }

    /// Merge `patch` into every row matched by the filters.
    pub fn update(self, patch: Value) -> QueryBuilder {
        self.with_action(Action::Update, Some(patch))
    }

    /// Merge into rows with a matching id, insert the rest.
    pub fn upsert(self, rows: Value) -> QueryBuilder {
        self.with_action(Action::Upsert, Some(rows))
    }

    pub fn delete(self) -> QueryBuilder {
        self.with_action(Action::Delete, None)
    }

    pub fn table(&self) -> &str {
        &self.request.table
    }
}

impl IntoFuture for TableQuery {
    type Output = QueryResponse;
    type IntoFuture = Ready<QueryResponse>;

    fn into_future(self) -> Self::IntoFuture {
        ready(QueryResponse::empty())
    }
}

/// An action plus filters and modifiers, waiting to be run.
#[must_use = "a query does nothing until it is awaited or executed"]
pub struct QueryBuilder {
    engine: Arc<Engine>,
    request: QueryRequest,
}

impl QueryBuilder {
    /// Keep rows whose `field` loosely equals `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request.filters.push(Filter::eq(field, value.into()));
        self
    }

    /// Keep rows whose `field` does not loosely equal `value`.
    pub fn neq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request.filters.push(Filter::neq(field, value.into()));
        self
    }

    /// Sort by `field`; applied before `limit`. A later call replaces an earlier one.
    pub fn order(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.request.order = Some(OrderBy::new(field, ascending));
        self
    }

    /// Keep the first `n` rows after ordering.
    pub fn limit(mut self, n: usize) -> Self {
        self.request.limit = Some(n);
        self
    }

    /// Collapse a select to its first row, or null.
    pub fn single(mut self) -> Self {
        self.request.single = true;
        self
    }

    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    pub fn into_request(self) -> QueryRequest {
        self.request
    }

    /// Run the request now, on the calling thread.
    pub fn execute(self) -> QueryResponse {
        self.engine.execute(self.request)
    }
}

impl IntoFuture for QueryBuilder {
    type Output = QueryResponse;
    type IntoFuture = BoxFuture<'static, QueryResponse>;

    fn into_future(self) -> Self::IntoFuture {
        let QueryBuilder { engine, request } = self;
        Box::pin(async move { engine.execute(request) })
    }
}

// src/queries/mod.rs
//! Canned analytical queries.
//!
//! Each query is an opaque unit behind the [`CannedQuery`] capability:
//! a metadata description and a text-producing result computation over a
//! date window. The catalog maps the small integer ids the routes speak
//! to the registered implementations.

mod activity;

use crate::error::GatewayError;
use crate::store::ResultsLog;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

pub use activity::ActivityQuery;

/// Structured description of one canned query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryInfo {
    pub id: u8,
    pub name: String,
    pub description: String,
    pub parameters: Vec<String>,
}

/// One pre-defined analytical query.
#[async_trait::async_trait]
pub trait CannedQuery: Send + Sync {
    /// Describes the query: id, name, and the parameters it takes.
    fn info(&self) -> QueryInfo;

    /// Computes the query over the given window, as raw response text.
    async fn result(&self, start: NaiveDateTime, end: NaiveDateTime)
        -> Result<String, GatewayError>;
}

/// The registered canned queries, looked up by id.
pub struct QueryCatalog {
    queries: Vec<Arc<dyn CannedQuery>>,
}

impl QueryCatalog {
    /// Builds the catalog with every built-in query, wired to the
    /// results log when one is configured.
    pub fn new(results: Option<Arc<ResultsLog>>) -> Self {
        Self {
            queries: vec![Arc::new(ActivityQuery::new(results))],
        }
    }

    pub fn lookup(&self, id: u8) -> Option<&Arc<dyn CannedQuery>> {
        self.queries.iter().find(|query| query.info().id == id)
    }
}

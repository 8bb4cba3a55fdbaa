// src/fetch.rs
//! Database fetching with the gateway's fail-open policy.
//!
//! Upstream failure is an explicit success-with-empty-payload outcome at
//! this boundary, never an error path: a dead or misconfigured upstream
//! must not block the rest of a batch from exporting.

use crate::api::WorkspaceSource;
use crate::error::GatewayError;
use crate::model::{DatabaseRow, Record};

/// Retrieves all rows of the named database this gateway will ever see:
/// the first page.
///
/// Any upstream failure (auth, network, not-found) is logged and swallowed
/// into an empty sequence. When the database holds more rows than one
/// page, the truncation is logged but not acted on.
pub async fn fetch_collection(source: &dyn WorkspaceSource, database_id: &str) -> Vec<DatabaseRow> {
    match source.query_rows(database_id).await {
        Ok(page) => {
            if page.has_more {
                log::info!(
                    "database '{}' has more rows, but they are not being fetched",
                    database_id
                );
            }
            page.results
        }
        Err(err) => {
            log::error!("query for database '{}' failed: {}", database_id, err);
            Vec::new()
        }
    }
}

/// Degrades a repository fetch outcome to the empty batch, logging the
/// failure against the collection it belongs to.
pub fn empty_on_failure(outcome: Result<Vec<Record>, GatewayError>, collection: &str) -> Vec<Record> {
    match outcome {
        Ok(records) => records,
        Err(err) => {
            log::error!("fetch for collection '{}' failed: {}", collection, err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamErrorCode;
    use crate::model::RowPage;

    struct CannedSource {
        outcome: Result<RowPage, ()>,
    }

    #[async_trait::async_trait]
    impl WorkspaceSource for CannedSource {
        async fn query_rows(&self, _database_id: &str) -> Result<RowPage, GatewayError> {
            match &self.outcome {
                Ok(page) => Ok(page.clone()),
                Err(()) => Err(GatewayError::UpstreamService {
                    code: UpstreamErrorCode::Unauthorized,
                    message: "bad token".to_string(),
                    status: 401,
                }),
            }
        }
    }

    fn page_of(count: usize, has_more: bool) -> RowPage {
        let rows = (0..count)
            .map(|i| {
                serde_json::from_value(serde_json::json!({"id": format!("row-{}", i)})).unwrap()
            })
            .collect();
        RowPage {
            results: rows,
            has_more,
            next_cursor: None,
        }
    }

    #[tokio::test]
    async fn upstream_failure_degrades_to_empty() {
        let source = CannedSource { outcome: Err(()) };
        let rows = fetch_collection(&source, "db-1").await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn truncated_page_still_returns_fetched_rows() {
        let source = CannedSource {
            outcome: Ok(page_of(3, true)),
        };
        let rows = fetch_collection(&source, "db-1").await;
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn empty_on_failure_swallows_errors() {
        let failed: Result<Vec<Record>, GatewayError> =
            Err(GatewayError::MalformedResponse("boom".to_string()));
        assert!(empty_on_failure(failed, "server").is_empty());

        let mut record = Record::new();
        record.insert("title".to_string(), crate::model::Scalar::from("ok"));
        let succeeded = Ok(vec![record]);
        assert_eq!(empty_on_failure(succeeded, "server").len(), 1);
    }
}

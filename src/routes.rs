// src/routes.rs
//! HTTP surface. Handlers are pass-through plumbing: resolve the
//! collection list, run the aggregation chain, hand the batch to the
//! exporter, and wrap the text in a response. All policy lives in the
//! core modules.

use crate::aggregate::{aggregate, resolve_collections};
use crate::api::{RepositorySource, WorkspaceSource};
use crate::config::GatewayConfig;
use crate::constants::{ISSUE_EXPORT_COLUMNS, PULL_EXPORT_COLUMNS, SERVER_BANNER};
use crate::error::GatewayError;
use crate::export::{inferred_columns, to_csv};
use crate::fetch::{empty_on_failure, fetch_collection};
use crate::model::Record;
use crate::normalize::normalize;
use crate::queries::QueryCatalog;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Everything the handlers share. Clients are injected as trait objects
/// so tests can substitute canned sources.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub workspace: Arc<dyn WorkspaceSource>,
    pub repositories: Arc<dyn RepositorySource>,
    pub queries: Arc<QueryCatalog>,
}

/// Builds the full route table over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/github/issues", get(github_issues))
        .route("/github/pulls", get(github_pulls))
        .route("/notion/database", get(notion_database))
        .route("/redash", get(redash_info))
        .route("/redash/1", get(redash_query_1))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": SERVER_BANNER }))
}

/// Query parameters shared by the issue and pull exports: an optional
/// comma-separated repo list and a flag that makes it exclusive instead
/// of additive.
#[derive(Debug, Deserialize)]
struct RepoListParams {
    #[serde(default)]
    repos: String,
    #[serde(default)]
    force: u8,
}

async fn github_issues(
    State(state): State<AppState>,
    Query(params): Query<RepoListParams>,
) -> Response {
    let collections = resolve_collections(
        &params.repos,
        params.force != 0,
        &state.config.default_repos,
    );

    let batch = aggregate(&collections, |repo| {
        let repositories = Arc::clone(&state.repositories);
        let owner = state.config.github_owner.clone();
        async move { empty_on_failure(repositories.list_issues(&owner, &repo).await, &repo) }
    })
    .await;

    csv_response(to_csv(&batch, &ISSUE_EXPORT_COLUMNS))
}

async fn github_pulls(
    State(state): State<AppState>,
    Query(params): Query<RepoListParams>,
) -> Response {
    let collections = resolve_collections(
        &params.repos,
        params.force != 0,
        &state.config.default_repos,
    );

    let batch = aggregate(&collections, |repo| {
        let repositories = Arc::clone(&state.repositories);
        let owner = state.config.github_owner.clone();
        async move { empty_on_failure(repositories.list_pulls(&owner, &repo).await, &repo) }
    })
    .await;

    csv_response(to_csv(&batch, &PULL_EXPORT_COLUMNS))
}

#[derive(Debug, Deserialize)]
struct DatabaseParams {
    id: Option<String>,
}

async fn notion_database(
    State(state): State<AppState>,
    Query(params): Query<DatabaseParams>,
) -> Response {
    let requested = params.id.filter(|id| !id.trim().is_empty());
    let Some(database_id) = requested.or_else(|| state.config.default_database.clone()) else {
        log::warn!("no database id supplied and no default configured");
        return csv_response(Ok(String::new()));
    };

    let rows = fetch_collection(state.workspace.as_ref(), &database_id).await;
    let records: Vec<Record> = rows.iter().map(normalize).collect();
    let columns = inferred_columns(&records);

    csv_response(to_csv(&records, &columns))
}

#[derive(Debug, Deserialize)]
struct QuerySelector {
    q: Option<u8>,
}

async fn redash_info(
    State(state): State<AppState>,
    Query(params): Query<QuerySelector>,
) -> Response {
    match params.q {
        Some(id) => match state.queries.lookup(id) {
            Some(query) => Json(query.info()).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("no query with id {}", id) })),
            )
                .into_response(),
        },
        None => Json(json!({ "message": "Run redash-like queries" })).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct DateWindowParams {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
}

async fn redash_query_1(
    State(state): State<AppState>,
    Query(params): Query<DateWindowParams>,
) -> Response {
    let Some(query) = state.queries.lookup(1) else {
        return (StatusCode::NOT_FOUND, "query 1 is not registered").into_response();
    };

    match query.result(params.start_date, params.end_date).await {
        Ok(text) => csv_response(Ok(text)),
        Err(err) => {
            log::error!("query 1 failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "query failed").into_response()
        }
    }
}

fn csv_response(outcome: Result<String, GatewayError>) -> Response {
    match outcome {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(err) => {
            log::error!("export failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}

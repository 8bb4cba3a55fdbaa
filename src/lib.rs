// src/lib.rs
//! raptor library — a small HTTP gateway that proxies read-only data
//! sources and re-emits the retrieved records as CSV or JSON.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `GatewayError`, `UpstreamErrorCode`
//! - **Configuration** — `GatewayConfig`, `CommandLineInput`, `ApiToken`
//! - **Domain model** — `Record`, `Scalar`, `PropertyValue`, `DatabaseRow`
//! - **Core flow** — `normalize`, `fetch_collection`, `aggregate`, `to_csv`
//! - **API clients** — `NotionHttpClient`, `GithubHttpClient` behind
//!   the `WorkspaceSource`/`RepositorySource` capability traits
//! - **HTTP surface** — `router`, `AppState`

mod aggregate;
mod api;
mod config;
mod constants;
mod error;
mod export;
mod fetch;
mod model;
mod normalize;
mod queries;
mod routes;
mod store;

// --- Error Handling ---
pub use crate::error::{GatewayError, Result, UpstreamErrorCode};

// --- Configuration ---
pub use crate::config::{ApiToken, CommandLineInput, GatewayConfig};

// --- Domain Model ---
pub use crate::model::{
    DatabaseRow, DateRange, PropertyValue, Record, RichTextFragment, RowPage, Scalar, SelectOption,
};

// --- Core Flow ---
pub use crate::aggregate::{aggregate, resolve_collections};
pub use crate::export::{inferred_columns, to_csv};
pub use crate::fetch::{empty_on_failure, fetch_collection};
pub use crate::normalize::{decode_property, normalize};

// --- Export Contracts ---
pub use crate::constants::{
    ACTIVITY_REPORT_COLUMNS, ISSUE_EXPORT_COLUMNS, PULL_EXPORT_COLUMNS, SERVER_BANNER,
};

// --- API Clients (Capability Traits) ---
pub use crate::api::{GithubHttpClient, NotionHttpClient, RepositorySource, WorkspaceSource};

// --- Canned Queries ---
pub use crate::queries::{ActivityQuery, CannedQuery, QueryCatalog, QueryInfo};

// --- Results Log ---
pub use crate::store::{DailyCount, ResultsLog};

// --- HTTP Surface ---
pub use crate::routes::{router, AppState};

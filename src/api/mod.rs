// src/api/mod.rs
//! Upstream API interaction — the ability to retrieve records from the
//! services this gateway proxies.
//!
//! Route handlers depend on these capability traits, never on HTTP
//! details. Each trait has exactly one production implementation; tests
//! substitute their own.

pub mod github;
pub mod notion;

use crate::error::GatewayError;
use crate::model::{Record, RowPage};

/// The ability to query rows out of a workspace database.
#[async_trait::async_trait]
pub trait WorkspaceSource: Send + Sync {
    /// Retrieves the first page of rows for the given database.
    async fn query_rows(&self, database_id: &str) -> Result<RowPage, GatewayError>;
}

/// The ability to list issues and pull requests for a repository.
///
/// Records come back already flattened to scalars: list-valued fields
/// (assignees, labels) are joined, object-valued fields reduced to their
/// display handle.
#[async_trait::async_trait]
pub trait RepositorySource: Send + Sync {
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Record>, GatewayError>;
    async fn list_pulls(&self, owner: &str, repo: &str) -> Result<Vec<Record>, GatewayError>;
}

pub use github::GithubHttpClient;
pub use notion::NotionHttpClient;

// src/model/row.rs
use indexmap::IndexMap;
use serde::Deserialize;

/// One raw database row as the Notion API returns it.
///
/// Properties stay as untyped JSON here; the normalizer decides per
/// property how (and whether) each one flattens. Rows are ephemeral:
/// built per request, discarded after normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: IndexMap<String, serde_json::Value>,
}

/// A single page of database query results.
///
/// Exactly one page is ever fetched. `has_more` reports that the
/// database holds further rows; the fetcher logs that fact and moves on.
#[derive(Debug, Clone, Deserialize)]
pub struct RowPage {
    #[serde(default)]
    pub results: Vec<DatabaseRow>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

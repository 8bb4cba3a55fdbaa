// src/aggregate.rs
//! Record aggregation across an ordered list of collections.
//!
//! Collections are fetched strictly in sequence, no fan-out, and the
//! results concatenate in request order with records inside each
//! collection keeping their upstream order. Nothing is deduplicated: a
//! record that shows up in two requested collections appears twice.

use crate::model::Record;
use std::future::Future;

/// Merges the caller-requested collection list with the configured
/// defaults. The defaults are appended unless the caller forces an
/// exclusive list.
pub fn resolve_collections(requested: &str, force: bool, defaults: &[String]) -> Vec<String> {
    let mut collections = crate::config::split_list(requested);
    if !force {
        collections.extend(defaults.iter().cloned());
    }
    collections
}

/// Fetches every collection through the injected endpoint and
/// concatenates the results.
///
/// The endpoint is expected to degrade failures to the empty batch
/// itself (see the fetch module); one empty collection never blocks the
/// ones after it.
pub async fn aggregate<F, Fut>(collections: &[String], fetch: F) -> Vec<Record>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Vec<Record>>,
{
    let mut batch = Vec::new();

    for name in collections {
        let records = fetch(name.clone()).await;
        log::debug!("collection '{}' contributed {} records", name, records.len());
        batch.extend(records);
    }

    batch
}

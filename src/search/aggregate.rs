//! Fan-out of one search to every active provider.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::SearchError;
use crate::models::{CatalogItem, ProviderQuery};
use crate::sources::{MediaFormats, Source, SourceError, SourceRegistry};

/// Query one provider, turning any failure into an empty contribution.
///
/// The failure is logged and dropped; a provider outage only makes the result
/// set less complete. With `limit` set, a provider that has not answered in
/// time counts as failed.
pub async fn fetch_or_empty(
    source: &dyn Source,
    query: &ProviderQuery,
    limit: Option<Duration>,
) -> Vec<CatalogItem> {
    let result = match limit {
        Some(limit) => match tokio::time::timeout(limit, source.fetch(query)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(limit)),
        },
        None => source.fetch(query).await,
    };

    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(source = source.id(), error = %e, "provider unavailable, continuing without it");
            Vec::new()
        }
    }
}

/// Query every registered provider whose format is not excluded.
///
/// Calls run concurrently on the runtime and are all awaited before returning.
/// Items are concatenated in registry order, regardless of which provider
/// answered first. Excluding every provider returns an empty list without
/// contacting anyone.
pub async fn aggregate(
    registry: &SourceRegistry,
    excluded: MediaFormats,
    query: &ProviderQuery,
    limit: Option<Duration>,
) -> Result<Vec<CatalogItem>, SearchError> {
    let active = registry.active(excluded);
    if active.is_empty() {
        debug!(excluded = %excluded.label(), "no active providers");
        return Ok(Vec::new());
    }

    let query = Arc::new(query.clone());
    let handles: Vec<_> = active
        .into_iter()
        .map(|source| {
            let query = Arc::clone(&query);
            debug!(source = source.id(), "dispatching provider query");
            tokio::spawn(async move { fetch_or_empty(source.as_ref(), &query, limit).await })
        })
        .collect();

    let mut items = Vec::new();
    for joined in join_all(handles).await {
        let batch = joined
            .map_err(|e| SearchError::Internal(format!("provider task failed: {}", e)))?;
        items.extend(batch);
    }

    Ok(items)
}

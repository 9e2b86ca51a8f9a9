//! The catalog search pipeline.
//!
//! A search runs through four steps:
//!
//! 1. [`aggregate`]: query every active provider concurrently
//! 2. [`deduplicate`](crate::utils::deduplicate): merge records of the same film
//! 3. [`sort`]: order by title or release year
//! 4. [`PageWindow`]: cut out the requested page
//!
//! Provider failures are absorbed in step 1. Malformed paging is rejected before
//! any provider is contacted, and any other failure aborts the whole search.

pub mod aggregate;
pub mod paginate;
pub mod sort;

pub use aggregate::{aggregate, fetch_or_empty};
pub use paginate::{paginate, PageWindow};
pub use sort::{collate, sort, TitleCollator};

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::config::Config;
use crate::models::{SearchRequest, SearchResponse};
use crate::sources::{SourceError, SourceRegistry};
use crate::utils::{deduplicate, ValidationError};

/// Errors surfaced to the caller of a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request itself is malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Unexpected failure inside the pipeline
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SearchError {
    /// HTTP status a request handler should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::InvalidArgument(_) => 400,
            SearchError::Internal(_) => 500,
        }
    }
}

/// Entry point of the search pipeline.
///
/// Holds no per-search state; one instance can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    registry: Arc<SourceRegistry>,
    provider_timeout: Option<Duration>,
}

impl CatalogSearch {
    /// Create a search over the given providers
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self {
            registry,
            provider_timeout: None,
        }
    }

    /// Build the configured providers and timeouts
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let registry = SourceRegistry::from_config(config)?;
        Ok(Self::new(Arc::new(registry)).with_provider_timeout(config.search.provider_timeout()))
    }

    /// Bound each provider call; a provider exceeding it contributes nothing
    pub fn with_provider_timeout(mut self, limit: Option<Duration>) -> Self {
        self.provider_timeout = limit;
        self
    }

    /// Providers this search fans out to
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Run a search and return the requested page.
    ///
    /// `total_results` counts consolidated films before pagination.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let window = PageWindow::new(request.current_page, request.page_size)?;
        let excluded = request.excluded_formats();
        let started = Instant::now();

        info!(
            page = window.current_page(),
            page_size = window.page_size(),
            sort_field = %request.sort_field,
            sort_direction = %request.sort_direction,
            excluded = %excluded.label(),
            "starting catalog search"
        );

        let items = aggregate(
            &self.registry,
            excluded,
            &request.provider_query(),
            self.provider_timeout,
        )
        .await
        .map_err(|e| {
            error!(error = %e, "catalog search failed");
            e
        })?;
        let fetched = items.len();

        let mut films = deduplicate(items);
        let total_results = films.len();

        sort(&mut films, request.sort_field, request.sort_direction);
        let results = window.apply(films);

        info!(
            fetched,
            total_results,
            returned = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog search complete"
        );

        Ok(SearchResponse::new(
            window.current_page(),
            window.page_size(),
            total_results,
            results,
        ))
    }
}

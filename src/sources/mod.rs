//! Catalog provider plugins with a trait-based architecture.
//!
//! Every provider implements [`Source`]. The [`SourceRegistry`] keeps them in
//! declaration order (VHS, DVD, Projector for the configured registry), which is
//! also the order their results are concatenated in before consolidation.
//!
//! # Runtime Provider Configuration
//!
//! Providers are built from the `[providers.*]` sections of the configuration
//! file. Each section can be overridden through the environment:
//!
//! ```bash
//! export LANTERN_PROVIDERS__DVD__ENDPOINT="https://dvd.internal/api/films/search"
//! export LANTERN_PROVIDERS__PROJECTOR__ENABLED=false
//! ```
//!
//! A disabled provider is never registered; a provider excluded by a request is
//! registered but skipped for that search only.

mod catalog;
pub mod mock;
mod registry;

pub use catalog::CatalogSource;
pub use mock::MockSource;
pub use registry::{MediaFormats, SourceRegistry};

use crate::models::{CatalogItem, ProviderQuery};
use async_trait::async_trait;

/// The Source trait defines the interface for all catalog providers.
///
/// # Implementing a New Source
///
/// 1. Create a struct that implements `Source`
/// 2. Report the media format it serves from `format`
/// 3. Register it with [`SourceRegistry::register`]
///
/// `fetch` reports failures as [`SourceError`]; the search pipeline turns them
/// into an empty contribution, so implementations should not swallow errors
/// themselves.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "vhs", "dvd")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Media format this provider holds inventory for
    fn format(&self) -> MediaFormats;

    /// Query the provider with the caller's filter criteria
    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<CatalogItem>, SourceError>;
}

/// Errors that can occur when querying a provider.
///
/// All variants mean the provider is unavailable for this search.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The provider did not answer in time
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The provider answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

//! # Lantern Search
//!
//! Film availability search across the VHS, DVD and Projector catalog
//! providers of a video rental chain.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (CatalogItem, SearchRequest, etc.)
//! - [`sources`]: Catalog provider plugins with a trait-based architecture
//! - [`search`]: The aggregation pipeline (fan-out, consolidation, sorting, paging)
//! - [`utils`]: HTTP client, deduplication, validation and display helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod search;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{CatalogItem, ConsolidatedItem, SearchRequest, SearchResponse};
pub use search::{CatalogSearch, SearchError};
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

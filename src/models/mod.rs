//! Core data models for catalog records and search operations.

mod film;
mod search;

pub use film::{CatalogItem, ConsolidatedItem, DISTRIBUTOR_SEPARATOR};
pub use search::{
    FilterCriteria, ProviderQuery, SearchRequest, SearchResponse, SortDirection, SortField,
};

//! Utility modules supporting catalog search.
//!
//! - [`deduplicate`]: Merge records of the same film reported by several providers
//! - [`IdentityKey`]: The (title, release year) identity used for merging
//! - [`HttpClient`]: Shared HTTP client with transport timeouts
//! - [`validate_page_window`], [`validate_endpoint`]: Fail-fast input validation
//! - [`render_results_table`]: Terminal rendering of a result page
//!
//! # Deduplication
//!
//! ```rust
//! use lantern_search::models::CatalogItem;
//! use lantern_search::utils::deduplicate;
//!
//! # fn example(items: Vec<CatalogItem>) {
//! let films = deduplicate(items);
//! for film in &films {
//!     println!("{} ({}): {} copies", film.title, film.release_year, film.total_copies_available);
//! }
//! # }
//! ```

mod dedup;
mod display;
mod http;
mod validate;

pub use dedup::{deduplicate, IdentityKey};
pub use display::{
    format_page_summary, is_terminal, render_providers_table, render_results_table,
    result_table_columns, terminal_width, truncate_with_ellipsis,
};
pub use http::{HttpClient, DEFAULT_USER_AGENT};
pub use validate::{validate_endpoint, validate_page_window, ValidationError};

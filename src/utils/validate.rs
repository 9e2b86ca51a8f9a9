//! Input validation for search requests and provider endpoints.
//!
//! Everything here runs before any provider is contacted so malformed input
//! fails fast instead of producing a partially computed response.

use thiserror::Error;
use url::Url;

/// Validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currentPage must be at least 1, got {0}")]
    NonPositivePage(i64),

    #[error("pageSize must be at least 1, got {0}")]
    NonPositivePageSize(i64),

    #[error("Unknown sort field: {0} (expected 'title' or 'releaseYear')")]
    UnknownSortField(String),

    #[error("Unknown sort direction: {0} (expected 'ASC' or 'DESC')")]
    UnknownSortDirection(String),

    #[error("Malformed search request: {0}")]
    MalformedRequest(String),

    #[error("Invalid provider endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Check a page window and convert it to offsets usable for slicing.
///
/// Values too large for `usize` saturate; a saturated page simply lands past
/// the end of the results.
pub fn validate_page_window(
    current_page: i64,
    page_size: i64,
) -> Result<(usize, usize), ValidationError> {
    if current_page < 1 {
        return Err(ValidationError::NonPositivePage(current_page));
    }
    if page_size < 1 {
        return Err(ValidationError::NonPositivePageSize(page_size));
    }

    let page = usize::try_from(current_page).unwrap_or(usize::MAX);
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    Ok((page, size))
}

/// Validate a provider endpoint URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn validate_endpoint(endpoint: &str) -> Result<Url, ValidationError> {
    let endpoint = endpoint.trim();

    if endpoint.is_empty() {
        return Err(ValidationError::InvalidEndpoint("empty URL".to_string()));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| ValidationError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ValidationError::InvalidEndpoint(format!(
                "unsupported scheme '{}' in {}",
                scheme, endpoint
            )))
        }
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ValidationError::InvalidEndpoint(format!(
            "missing host in {}",
            endpoint
        ))),
    }
}

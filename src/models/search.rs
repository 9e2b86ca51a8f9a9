//! Search request and response models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ConsolidatedItem;
use crate::sources::MediaFormats;
use crate::utils::ValidationError;

/// Field used to order consolidated results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    ReleaseYear,
}

impl SortField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::ReleaseYear => "releaseYear",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(SortField::Title),
            "releaseYear" | "release_year" | "release-year" | "year" => Ok(SortField::ReleaseYear),
            other => Err(ValidationError::UnknownSortField(other.to_string())),
        }
    }
}

/// Direction of the ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire name of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(ValidationError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Free-form filter criteria forwarded to every provider unmodified.
///
/// The well-known keys are typed; anything else the caller sends is kept in
/// `extra` and serialized back alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor: Option<String>,

    /// Provider-specific keys passed through as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FilterCriteria {
    /// Create empty criteria (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title filter
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set release year filter
    pub fn release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    /// Set director filter
    pub fn director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Set distributor filter
    pub fn distributor(mut self, distributor: impl Into<String>) -> Self {
        self.distributor = Some(distributor.into());
        self
    }
}

/// Caller's search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, rename = "excludeVHS")]
    pub exclude_vhs: bool,

    #[serde(default, rename = "excludeDVD")]
    pub exclude_dvd: bool,

    #[serde(default)]
    pub exclude_projector: bool,

    /// 1-based page number
    #[serde(default = "default_current_page")]
    pub current_page: i64,

    /// Number of results per page
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    #[serde(default)]
    pub sort_field: SortField,

    #[serde(default)]
    pub sort_direction: SortDirection,

    /// Filter criteria forwarded to providers
    #[serde(default)]
    pub search: FilterCriteria,
}

fn default_current_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            exclude_vhs: false,
            exclude_dvd: false,
            exclude_projector: false,
            current_page: default_current_page(),
            page_size: default_page_size(),
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            search: FilterCriteria::default(),
        }
    }
}

impl SearchRequest {
    /// Create a request with default paging and ordering
    pub fn new(search: FilterCriteria) -> Self {
        Self {
            search,
            ..Default::default()
        }
    }

    /// Parse a request from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedRequest(e.to_string()))
    }

    /// Set the page window
    pub fn page(mut self, current_page: i64, page_size: i64) -> Self {
        self.current_page = current_page;
        self.page_size = page_size;
        self
    }

    /// Set the ordering
    pub fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    /// Exclude every provider of the given formats
    pub fn exclude(mut self, formats: MediaFormats) -> Self {
        self.exclude_vhs |= formats.contains(MediaFormats::VHS);
        self.exclude_dvd |= formats.contains(MediaFormats::DVD);
        self.exclude_projector |= formats.contains(MediaFormats::PROJECTOR);
        self
    }

    /// Formats whose providers must not be queried
    pub fn excluded_formats(&self) -> MediaFormats {
        let mut formats = MediaFormats::empty();
        formats.set(MediaFormats::VHS, self.exclude_vhs);
        formats.set(MediaFormats::DVD, self.exclude_dvd);
        formats.set(MediaFormats::PROJECTOR, self.exclude_projector);
        formats
    }

    /// Body sent to each provider
    pub fn provider_query(&self) -> ProviderQuery {
        ProviderQuery {
            current_page: self.current_page,
            page_size: self.page_size,
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
            search: self.search.clone(),
        }
    }
}

/// Query POSTed to a catalog provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuery {
    pub current_page: i64,
    pub page_size: i64,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub search: FilterCriteria,
}

/// Paged, consolidated search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Page echoed from the request
    pub current_page: usize,

    /// Page size echoed from the request
    pub page_size: usize,

    /// Number of consolidated films before pagination
    pub total_results: usize,

    /// Films on the requested page
    pub results: Vec<ConsolidatedItem>,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(
        current_page: usize,
        page_size: usize,
        total_results: usize,
        results: Vec<ConsolidatedItem>,
    ) -> Self {
        Self {
            current_page,
            page_size,
            total_results,
            results,
        }
    }

    /// Whether pages after this one hold more results
    pub fn has_more(&self) -> bool {
        self.current_page.saturating_mul(self.page_size) < self.total_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_wire_json() {
        let json = r#"{
            "excludeVHS": false,
            "excludeDVD": true,
            "excludeProjector": false,
            "currentPage": 2,
            "pageSize": 5,
            "sortField": "releaseYear",
            "sortDirection": "DESC",
            "search": {
                "title": "Matrix",
                "releaseYear": 1999,
                "director": "Wachowskis",
                "distributor": "Warner Bros"
            }
        }"#;

        let request = SearchRequest::from_json(json).unwrap();
        assert!(request.exclude_dvd);
        assert!(!request.exclude_vhs);
        assert_eq!(request.current_page, 2);
        assert_eq!(request.page_size, 5);
        assert_eq!(request.sort_field, SortField::ReleaseYear);
        assert_eq!(request.sort_direction, SortDirection::Desc);
        assert_eq!(request.search.title.as_deref(), Some("Matrix"));
        assert_eq!(request.search.release_year, Some(1999));
        assert_eq!(request.excluded_formats(), MediaFormats::DVD);
    }

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::from_json("{}").unwrap();
        assert_eq!(request.current_page, 1);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.sort_field, SortField::Title);
        assert_eq!(request.sort_direction, SortDirection::Asc);
        assert!(request.excluded_formats().is_empty());
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        let result = SearchRequest::from_json(r#"{"sortField": "director"}"#);
        assert!(matches!(result, Err(ValidationError::MalformedRequest(_))));

        assert!(matches!(
            "director".parse::<SortField>(),
            Err(ValidationError::UnknownSortField(_))
        ));
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_provider_query_passes_extra_criteria_through() {
        let json = r#"{"search": {"title": "Alien", "format": "widescreen"}}"#;
        let request = SearchRequest::from_json(json).unwrap();

        let body = serde_json::to_value(request.provider_query()).unwrap();
        assert_eq!(body["search"]["title"], "Alien");
        assert_eq!(body["search"]["format"], "widescreen");
        assert_eq!(body["sortField"], "title");
        assert_eq!(body["sortDirection"], "ASC");
        assert!(body.get("excludeVHS").is_none());
        assert!(body["search"].get("director").is_none());
    }

    #[test]
    fn test_exclude_builder() {
        let request = SearchRequest::default().exclude(MediaFormats::VHS | MediaFormats::PROJECTOR);
        assert!(request.exclude_vhs);
        assert!(!request.exclude_dvd);
        assert!(request.exclude_projector);
    }

    #[test]
    fn test_response_has_more() {
        let response = SearchResponse::new(1, 2, 3, Vec::new());
        assert!(response.has_more());

        let response = SearchResponse::new(2, 2, 3, Vec::new());
        assert!(!response.has_more());
    }
}

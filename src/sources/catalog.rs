//! HTTP catalog provider implementation.

use async_trait::async_trait;
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{CatalogItem, ProviderQuery};
use crate::sources::{MediaFormats, Source, SourceError};
use crate::utils::{validate_endpoint, HttpClient};

/// Catalog provider reached over HTTP
///
/// POSTs the provider query as JSON and expects a JSON array of catalog items
/// back. All three media formats speak the same contract, so one
/// implementation serves VHS, DVD and Projector alike.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    id: String,
    label: String,
    format: MediaFormats,
    endpoint: Url,
    client: HttpClient,
}

impl CatalogSource {
    /// Create a provider posting to `endpoint`
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        format: MediaFormats,
        endpoint: &str,
        client: HttpClient,
    ) -> Result<Self, SourceError> {
        let endpoint = validate_endpoint(endpoint).map_err(|e| SourceError::Other(e.to_string()))?;

        Ok(Self {
            id: id.into(),
            label: label.into(),
            format,
            endpoint,
            client,
        })
    }

    /// Create a provider from its configuration section
    ///
    /// An empty label falls back to the format name.
    pub fn from_config(
        id: &str,
        format: MediaFormats,
        config: &ProviderConfig,
        client: HttpClient,
    ) -> Result<Self, SourceError> {
        let label = match config.label.trim() {
            "" => format.label(),
            label => label.to_string(),
        };
        Self::new(id, label, format, &config.endpoint, client)
    }

    /// Endpoint this provider posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Records without a distributor are attributed to this provider's label
    fn label_item(&self, mut item: CatalogItem) -> CatalogItem {
        if item.distributor.trim().is_empty() {
            item.distributor = self.label.clone();
        }
        item
    }
}

#[async_trait]
impl Source for CatalogSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn format(&self) -> MediaFormats {
        self.format
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<CatalogItem>, SourceError> {
        let response = self
            .client
            .client()
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "{} provider returned status: {}",
                self.label, status
            )));
        }

        let body = response.text().await?;
        let items: Vec<CatalogItem> = serde_json::from_str(&body)?;

        tracing::debug!(source = %self.id, count = items.len(), "provider answered");

        Ok(items.into_iter().map(|item| self.label_item(item)).collect())
    }
}

//! Registry for managing catalog provider plugins.

use std::sync::Arc;

use super::{CatalogSource, Source, SourceError};
use crate::config::Config;
use crate::utils::HttpClient;

bitflags::bitflags! {
    /// Media formats served by catalog providers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MediaFormats: u32 {
        const VHS = 1 << 0;
        const DVD = 1 << 1;
        const PROJECTOR = 1 << 2;
    }
}

impl MediaFormats {
    /// Display label for a single format, or a joined label for a set
    pub fn label(&self) -> String {
        self.iter_names()
            .map(|(name, _)| match name {
                "PROJECTOR" => "Projector",
                other => other,
            })
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Parse a provider id or format name, case-insensitively
    pub fn parse_id(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "vhs" => Some(Self::VHS),
            "dvd" => Some(Self::DVD),
            "projector" => Some(Self::PROJECTOR),
            _ => None,
        }
    }
}

/// Registry for all available catalog providers
///
/// Providers are kept in registration order; aggregation results follow it.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the VHS, DVD and Projector providers from configuration
    ///
    /// Disabled providers are skipped. Every provider shares one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let client = HttpClient::from_config(&config.http)?;
        let mut registry = Self::new();

        for (id, provider) in config.providers.iter() {
            if !provider.enabled {
                tracing::info!(source = id, "provider disabled by configuration");
                continue;
            }
            let format = MediaFormats::parse_id(id)
                .ok_or_else(|| SourceError::Other(format!("Unknown provider: {}", id)))?;
            let source = CatalogSource::from_config(id, format, provider, client.clone())?;
            registry.register(Arc::new(source));
        }

        Ok(registry)
    }

    /// Register a new source
    ///
    /// A source with an already registered id replaces it in place.
    pub fn register(&mut self, source: Arc<dyn Source>) {
        match self.sources.iter().position(|s| s.id() == source.id()) {
            Some(idx) => self.sources[idx] = source,
            None => self.sources.push(source),
        }
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    /// Get all registered sources in declaration order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    /// Get all source IDs
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    /// Sources whose format is not excluded, in declaration order
    pub fn active(&self, excluded: MediaFormats) -> Vec<Arc<dyn Source>> {
        self.sources
            .iter()
            .filter(|s| !excluded.intersects(s.format()))
            .cloned()
            .collect()
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

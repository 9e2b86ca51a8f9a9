//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{CatalogItem, ProviderQuery};
use crate::sources::{MediaFormats, Source, SourceError};

#[derive(Debug, Clone)]
enum MockReply {
    Items(Vec<CatalogItem>),
    Failure(String),
}

/// A mock source for testing that returns predefined items or a failure.
///
/// Every call to `fetch` is counted, so tests can assert that excluded
/// providers were never contacted.
#[derive(Debug)]
pub struct MockSource {
    id: String,
    format: MediaFormats,
    reply: Mutex<MockReply>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source returning no items.
    pub fn new(id: impl Into<String>, format: MediaFormats) -> Self {
        Self {
            id: id.into(),
            format,
            reply: Mutex::new(MockReply::Items(Vec::new())),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Return these items from every fetch.
    pub fn with_items(self, items: Vec<CatalogItem>) -> Self {
        self.set_items(items);
        self
    }

    /// Fail every fetch with a network error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        self.set_failure(message);
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the configured items.
    pub fn set_items(&self, items: Vec<CatalogItem>) {
        *self.reply.lock().unwrap_or_else(|e| e.into_inner()) = MockReply::Items(items);
    }

    /// Make subsequent fetches fail.
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.reply.lock().unwrap_or_else(|e| e.into_inner()) = MockReply::Failure(message.into());
    }

    /// Number of times `fetch` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn format(&self) -> MediaFormats {
        self.format
    }

    async fn fetch(&self, _query: &ProviderQuery) -> Result<Vec<CatalogItem>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.reply.lock().unwrap_or_else(|e| e.into_inner()).clone();
        match reply {
            MockReply::Items(items) => Ok(items),
            MockReply::Failure(message) => Err(SourceError::Network(message)),
        }
    }
}

/// Helper function to create a catalog item for testing.
pub fn make_item(title: &str, release_year: i32, copies: u32, distributor: &str) -> CatalogItem {
    CatalogItem::new(title, release_year, copies, "Director", distributor)
}

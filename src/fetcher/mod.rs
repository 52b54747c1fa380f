//! HTTP fetcher for bookmarked pages.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Fetch failures never propagate out of
//! [`PageFetcher::fetch_document`]: a dead page still yields a document so the
//! bookmark stays searchable by title and url.

mod async_wrapper;
pub mod extract;

pub use async_wrapper::{AsyncPageFetcher, AsyncPageFetcherImpl};

use crate::config::Config;
use crate::domain::DocumentId;
use crate::error::{FetchError, FetchResult};
use crate::metrics::{FetchTimer, Metrics};
use crate::models::{Bookmark, IndexedDocument};
use std::sync::Arc;
use std::time::Duration;

/// Content stored for pages that answered with a non-success status.
pub fn unavailable_placeholder(status: u16, reason: &str) -> String {
    format!("-_- Content unavailable: {}: {}", status, reason)
}

/// HTTP client for bookmarked pages.
///
/// Uses `ureq` for synchronous requests; see [`AsyncPageFetcherImpl`] for
/// the async wrapper.
#[derive(Clone)]
pub struct PageFetcher {
    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl PageFetcher {
    /// Create a new PageFetcher from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        Self::with_timeout(Duration::from_secs(config.request_timeout), metrics)
    }

    /// Create a PageFetcher with an explicit request timeout.
    pub fn with_timeout(timeout: Duration, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Fetch a page and return its visible body text.
    pub fn fetch_content(&self, url: &str) -> FetchResult<String> {
        let timer = FetchTimer::new(self.metrics.clone());
        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(url)
            .call()
            .map_err(map_error)
            .and_then(|response| {
                response
                    .into_string()
                    .map_err(|e| FetchError::Body(e.to_string()))
            })
            .map(|html| extract::extract_body_text(&html));

        match &result {
            Ok(text) => {
                tracing::debug!("GET {} - {} chars extracted", url, text.len());
                timer.complete();
            }
            Err(e) => {
                tracing::debug!("GET {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Fetch a bookmark's page and build its document.
    ///
    /// A non-success status yields the "unavailable" placeholder as content;
    /// any other failure is logged and yields a document without content.
    pub fn fetch_document(&self, id: DocumentId, bookmark: &Bookmark) -> IndexedDocument {
        let content = match self.fetch_content(&bookmark.url) {
            Ok(text) => Some(text),
            Err(FetchError::Status { status, reason }) => {
                tracing::warn!(
                    "Page for bookmark {} unavailable ({}): {}",
                    bookmark.id,
                    status,
                    bookmark.url
                );
                Some(unavailable_placeholder(status, &reason))
            }
            Err(e) => {
                tracing::warn!("Error creating doc for {}: {}", bookmark.url, e);
                None
            }
        };

        IndexedDocument::new(id, bookmark, content)
    }
}

/// Map a ureq error to a FetchError.
fn map_error(error: ureq::Error) -> FetchError {
    match error {
        ureq::Error::Status(status, response) => FetchError::Status {
            status,
            reason: response.status_text().to_string(),
        },
        ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
    }
}

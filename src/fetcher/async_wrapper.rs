//! Async wrapper around the synchronous PageFetcher.
//!
//! This module provides an async interface to the synchronous PageFetcher by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::domain::DocumentId;
use crate::fetcher::PageFetcher;
use crate::models::{Bookmark, IndexedDocument};
use async_trait::async_trait;
use std::sync::Arc;

/// Async page fetching.
///
/// Implementations must not fail: the returned document carries whatever
/// content could be obtained.
#[async_trait]
pub trait AsyncPageFetcher: Send + Sync {
    async fn fetch_document(&self, id: DocumentId, bookmark: Bookmark) -> IndexedDocument;
}

/// Async wrapper around synchronous PageFetcher.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncPageFetcherImpl {
    fetcher: Arc<PageFetcher>,
}

impl AsyncPageFetcherImpl {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

#[async_trait]
impl AsyncPageFetcher for AsyncPageFetcherImpl {
    async fn fetch_document(&self, id: DocumentId, bookmark: Bookmark) -> IndexedDocument {
        let fetcher = self.fetcher.clone();
        let fallback = IndexedDocument::new(id.clone(), &bookmark, None);

        match tokio::task::spawn_blocking(move || fetcher.fetch_document(id, &bookmark)).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Fetch task for {} failed: {}", fallback.url, e);
                self.fetcher.metrics().record_fetch_error();
                fallback
            }
        }
    }
}

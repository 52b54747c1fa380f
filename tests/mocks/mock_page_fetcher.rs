use async_trait::async_trait;
use bookmark_search::domain::DocumentId;
use bookmark_search::fetcher::AsyncPageFetcher;
use bookmark_search::models::{Bookmark, IndexedDocument};
use bookmark_search::readiness::ReadinessSignal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock page fetcher returning canned page text.
///
/// Pages not registered with [`MockPageFetcher::add_page`] get
/// `"page text for <url>"`. Each fetch records the url and, when a
/// readiness signal is attached, the readiness flag at the time of the fetch.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pages: Arc<Mutex<HashMap<String, Option<String>>>>,
    fetched: Arc<Mutex<Vec<String>>>,
    ready_during_fetch: Arc<Mutex<Vec<bool>>>,
    readiness: Option<ReadinessSignal>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe this readiness flag on every fetch.
    pub fn observing(mut self, readiness: ReadinessSignal) -> Self {
        self.readiness = Some(readiness);
        self
    }

    /// Sleep before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Register the content returned for a url (`None` for a dead page).
    pub fn add_page(&self, url: &str, content: Option<&str>) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), content.map(str::to_string));
    }

    /// Urls fetched so far, in completion order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    /// Readiness observed by each fetch.
    pub fn readiness_during_fetch(&self) -> Vec<bool> {
        self.ready_during_fetch.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncPageFetcher for MockPageFetcher {
    async fn fetch_document(&self, id: DocumentId, bookmark: Bookmark) -> IndexedDocument {
        if let Some(readiness) = &self.readiness {
            self.ready_during_fetch
                .lock()
                .unwrap()
                .push(readiness.is_ready());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let content = self
            .pages
            .lock()
            .unwrap()
            .get(&bookmark.url)
            .cloned()
            .unwrap_or_else(|| Some(format!("page text for {}", bookmark.url)));
        self.fetched.lock().unwrap().push(bookmark.url.clone());

        IndexedDocument::new(id, &bookmark, content)
    }
}

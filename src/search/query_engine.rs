use crate::config::DisplaySettings;
use crate::metrics::Metrics;
use crate::models::SearchResult;
use crate::repositories::DocumentRepository;
use crate::search::merge::merge_results;
use crate::search::presentation::trim_content;
use crate::store::{SearchField, SearchRow};
use std::sync::Arc;
use std::time::Instant;

/// Answers free-text queries against the indexed bookmark pages.
///
/// Two strategies run concurrently: a literal url substring scan over every
/// stored document, and a highlighted full-text search over content, title
/// and url. Their hits are merged into one result per url.
pub struct QueryEngine {
    repository: Arc<dyn DocumentRepository>,
    settings: DisplaySettings,
    metrics: Metrics,
}

impl QueryEngine {
    /// Create a new query engine.
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        settings: DisplaySettings,
        metrics: Metrics,
    ) -> Self {
        Self {
            repository,
            settings,
            metrics,
        }
    }

    /// Display settings used for snippets and titles.
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Run a query; an empty or whitespace-only query yields no results.
    pub async fn search(&self, text: &str) -> Vec<SearchResult> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        self.metrics.record_search();

        let (mut results, content_results) =
            tokio::join!(self.search_url(text), self.search_content(text));
        results.extend(content_results);

        let merged = merge_results(results);
        tracing::debug!(
            "Query {:?} matched {} results in {}ms",
            text,
            merged.len(),
            start.elapsed().as_millis()
        );
        merged
    }

    /// Documents whose url contains the query literally.
    async fn search_url(&self, text: &str) -> Vec<SearchResult> {
        match self.repository.all_documents().await {
            Ok(docs) => docs
                .into_iter()
                .filter(|doc| doc.url.contains(text))
                .map(|doc| SearchResult::new(doc.title, doc.url, ""))
                .collect(),
            Err(e) => {
                tracing::error!("Error while searching bookmark urls: {}", e);
                Vec::new()
            }
        }
    }

    /// Highlighted full-text hits over content, title and url.
    async fn search_content(&self, text: &str) -> Vec<SearchResult> {
        match self.repository.search_content(text).await {
            Ok(rows) => rows.into_iter().map(|row| self.content_result(row)).collect(),
            Err(e) => {
                tracing::error!("Error encountered while searching content: {}", e);
                Vec::new()
            }
        }
    }

    fn content_result(&self, mut row: SearchRow) -> SearchResult {
        let title = row
            .highlighting
            .remove(&SearchField::Title)
            .unwrap_or(row.doc.title);

        let content = row
            .highlighting
            .get(&SearchField::Content)
            .map(|content| {
                trim_content(
                    content,
                    self.settings.context_before,
                    self.settings.context_after,
                )
            })
            .unwrap_or_default();

        SearchResult::new(title, row.doc.url, content)
    }
}

//! Bookmark search service.

use crate::error::{QueryResult, SearchError};
use crate::readiness::ReadinessSignal;
use crate::search::{results_summary, DisplayResult, QueryEngine};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

const MAX_QUERY_LEN: usize = 500;

/// Response for a bookmark search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub query: String,
    pub result_count: usize,
    pub summary: String,
    pub results: Vec<DisplayResult>,
}

/// Search service trait.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Search indexed bookmarks.
    ///
    /// Fails with `SearchError::IndexNotReady` while the index is being
    /// built. An empty query yields an empty response.
    async fn search(&self, query: String) -> QueryResult<SearchResponse>;
}

/// Default implementation of SearchService.
pub struct SearchServiceImpl {
    engine: Arc<QueryEngine>,
    readiness: ReadinessSignal,
}

impl SearchServiceImpl {
    /// Create a new search service.
    pub fn new(engine: Arc<QueryEngine>, readiness: ReadinessSignal) -> Self {
        Self { engine, readiness }
    }

    fn validate_query(query: &str) -> QueryResult<()> {
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(SearchError::InvalidParameters(format!(
                "Search query too long (max {} characters)",
                MAX_QUERY_LEN
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchService for SearchServiceImpl {
    async fn search(&self, query: String) -> QueryResult<SearchResponse> {
        Self::validate_query(&query)?;
        self.readiness.ensure_ready()?;

        let settings = *self.engine.settings();
        let results: Vec<DisplayResult> = self
            .engine
            .search(&query)
            .await
            .into_iter()
            .map(|result| DisplayResult::present(result, &settings))
            .collect();

        Ok(SearchResponse {
            query,
            result_count: results.len(),
            summary: results_summary(results.len()),
            results,
        })
    }
}

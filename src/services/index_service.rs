//! Index maintenance service.

use crate::error::SyncResult;
use crate::metrics::{Metrics, MetricsSummary};
use crate::models::BookmarkRef;
use crate::readiness::ReadinessSignal;
use crate::repositories::DocumentRepository;
use crate::sync::{SyncHandle, SyncReport, SyncTrigger};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Snapshot of the index state.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStatus {
    pub ready: bool,
    pub document_count: usize,
    pub last_indexed_at: Option<DateTime<Utc>>,
    pub metrics: MetricsSummary,
}

/// Index service trait.
#[async_trait]
pub trait IndexService: Send + Sync {
    /// Current readiness, document count and counters.
    async fn status(&self) -> IndexStatus;

    /// Re-index the whole bookmark tree and wait for the run to finish.
    async fn reindex(&self) -> SyncResult<SyncReport>;

    /// Queue indexing of a created bookmark or folder.
    ///
    /// Searches are refused until the queued run has rebuilt the index.
    fn bookmark_created(&self, node: BookmarkRef) -> SyncResult<()>;

    /// Queue removal of a deleted bookmark or folder.
    fn bookmark_removed(&self, node: BookmarkRef) -> SyncResult<()>;
}

/// Default implementation of IndexService.
pub struct IndexServiceImpl {
    sync: SyncHandle,
    repository: Arc<dyn DocumentRepository>,
    readiness: ReadinessSignal,
    metrics: Metrics,
}

impl IndexServiceImpl {
    /// Create a new index service.
    pub fn new(
        sync: SyncHandle,
        repository: Arc<dyn DocumentRepository>,
        readiness: ReadinessSignal,
        metrics: Metrics,
    ) -> Self {
        Self {
            sync,
            repository,
            readiness,
            metrics,
        }
    }
}

#[async_trait]
impl IndexService for IndexServiceImpl {
    async fn status(&self) -> IndexStatus {
        let readiness = self.readiness.current();
        IndexStatus {
            ready: readiness.ready,
            document_count: self.repository.list_ids().await.len(),
            last_indexed_at: readiness.ready_since,
            metrics: self.metrics.summary(),
        }
    }

    async fn reindex(&self) -> SyncResult<SyncReport> {
        self.sync.run(SyncTrigger::Startup).await
    }

    fn bookmark_created(&self, node: BookmarkRef) -> SyncResult<()> {
        tracing::debug!("Queueing created bookmark {}", node.id);
        // Searches wait for the queued run instead of reading a stale index
        self.readiness.set(false);
        self.sync.submit(SyncTrigger::Created(node))
    }

    fn bookmark_removed(&self, node: BookmarkRef) -> SyncResult<()> {
        tracing::debug!("Queueing removed bookmark {}", node.id);
        self.sync.submit(SyncTrigger::Removed(node))
    }
}

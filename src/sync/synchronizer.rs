//! Index synchronization runs.
//!
//! Each run translates one bookmark trigger into store writes or deletes,
//! then rebuilds the full-text index and updates the readiness flag.

use crate::bookmarks::{collect_bookmarks, reachable_document_ids, BookmarkProvider};
use crate::domain::DocumentId;
use crate::error::{StoreResult, SyncError, SyncResult};
use crate::fetcher::AsyncPageFetcher;
use crate::metrics::Metrics;
use crate::models::{Bookmark, BookmarkRef};
use crate::readiness::ReadinessSignal;
use crate::repositories::DocumentRepository;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// What caused a synchronization run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncTrigger {
    /// Index the whole bookmark tree
    Startup,
    /// A bookmark or folder was created
    Created(BookmarkRef),
    /// A bookmark or folder was removed
    Removed(BookmarkRef),
}

impl SyncTrigger {
    /// Short name for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Created(_) => "created",
            Self::Removed(_) => "removed",
        }
    }
}

/// Outcome of a synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Trigger kind
    pub trigger: &'static str,

    /// Documents written
    pub indexed: usize,

    /// Documents deleted
    pub removed: usize,

    /// Failed writes or deletes, by document id
    pub failed: Vec<String>,

    /// Whether the index rebuild succeeded
    pub index_built: bool,

    /// Wall-clock duration of the run
    pub duration_ms: u128,
}

/// Drives the fetcher and the document repository from bookmark triggers.
pub struct IndexSynchronizer {
    provider: Arc<dyn BookmarkProvider>,
    fetcher: Arc<dyn AsyncPageFetcher>,
    repository: Arc<dyn DocumentRepository>,
    readiness: ReadinessSignal,
    metrics: Metrics,
}

impl IndexSynchronizer {
    /// Create a new synchronizer.
    pub fn new(
        provider: Arc<dyn BookmarkProvider>,
        fetcher: Arc<dyn AsyncPageFetcher>,
        repository: Arc<dyn DocumentRepository>,
        readiness: ReadinessSignal,
        metrics: Metrics,
    ) -> Self {
        Self {
            provider,
            fetcher,
            repository,
            readiness,
            metrics,
        }
    }

    /// Execute one run for the given trigger.
    pub async fn run(&self, trigger: SyncTrigger) -> SyncResult<SyncReport> {
        let start = Instant::now();
        let kind = trigger.kind();
        tracing::info!("Index synchronization started ({})", kind);

        let result = match trigger {
            SyncTrigger::Startup => self.initialise().await,
            SyncTrigger::Created(node) => self.handle_created(&node).await,
            SyncTrigger::Removed(node) => self.handle_removed(&node).await,
        };

        result.map(|mut report| {
            report.duration_ms = start.elapsed().as_millis();
            tracing::info!(
                "Index synchronization finished ({}): {} indexed, {} removed, {} failed in {}ms",
                kind,
                report.indexed,
                report.removed,
                report.failed.len(),
                report.duration_ms
            );
            report
        })
    }

    /// Index every leaf of the full bookmark tree.
    ///
    /// Stored documents whose bookmark is no longer in the tree are deleted,
    /// so a successful run leaves exactly the tree's document ids behind.
    pub async fn initialise(&self) -> SyncResult<SyncReport> {
        self.readiness.set(false);

        let root = self.provider.get_tree().await?;
        let mut report = self.index_bookmarks(collect_bookmarks(&root)).await;
        report.trigger = SyncTrigger::Startup.kind();

        let reachable = reachable_document_ids(&root);
        let stale = self
            .repository
            .list_ids()
            .await
            .into_iter()
            .filter(|id| !reachable.contains(id))
            .collect();
        self.delete_documents(stale, &mut report).await;

        self.finish_indexing(report).await
    }

    /// Index the leaves of a newly created node.
    pub async fn handle_created(&self, node: &BookmarkRef) -> SyncResult<SyncReport> {
        self.readiness.set(false);

        let mut report = self.index_bookmarks(collect_bookmarks(node)).await;
        report.trigger = "created";

        self.finish_indexing(report).await
    }

    /// Delete the documents of a removed node.
    ///
    /// A removed leaf maps to exactly one document. A removed folder is
    /// reconciled against the current tree instead, since the event's
    /// subtree cannot be trusted to name every descendant.
    pub async fn handle_removed(&self, node: &BookmarkRef) -> SyncResult<SyncReport> {
        let mut report = SyncReport {
            trigger: "removed",
            ..Default::default()
        };

        let deletions = match node.as_bookmark() {
            Some(bookmark) => match bookmark.document_id() {
                Ok(id) => vec![id],
                Err(e) => {
                    tracing::error!("Removed bookmark {} has no document id: {}", node.id, e);
                    Vec::new()
                }
            },
            None => self.stale_document_ids().await,
        };
        self.delete_documents(deletions, &mut report).await;

        self.finish_indexing(report).await
    }

    /// Delete documents concurrently, adding the outcome to the report.
    async fn delete_documents(&self, ids: Vec<DocumentId>, report: &mut SyncReport) {
        let results = join_all(ids.into_iter().map(|id| async move {
            let result = self.repository.delete(&id).await;
            (id, result)
        }))
        .await;

        let mut removed = 0;
        let mut failed = 0;
        for (id, result) in results {
            match result {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::error!("Error while deleting doc with id {}: {}", id, e);
                    report.failed.push(id.into_inner());
                    failed += 1;
                }
            }
        }
        report.removed += removed;
        self.metrics.record_documents_removed(removed);
        self.metrics.record_store_errors(failed);
    }

    /// Stored ids no longer reachable from the current bookmark tree.
    async fn stale_document_ids(&self) -> Vec<DocumentId> {
        let (stored, tree) = tokio::join!(self.repository.list_ids(), self.provider.get_tree());

        let reachable: HashSet<DocumentId> = match tree {
            Ok(root) => reachable_document_ids(&root),
            Err(e) => {
                tracing::error!("Error removing folder, bookmark tree unavailable: {}", e);
                return Vec::new();
            }
        };

        stored
            .into_iter()
            .filter(|id| !reachable.contains(id))
            .collect()
    }

    /// Fetch and store every bookmark concurrently.
    ///
    /// Bookmarks without a document identity are skipped, not failed.
    async fn index_bookmarks(&self, bookmarks: Vec<Bookmark>) -> SyncReport {
        let mut report = SyncReport::default();

        let work = bookmarks
            .into_iter()
            .filter_map(|bookmark| match bookmark.document_id() {
                Ok(id) => Some(self.index_bookmark(id, bookmark)),
                Err(e) => {
                    tracing::warn!("Skipping bookmark {:?}: {}", bookmark.id, e);
                    None
                }
            });
        let results = join_all(work).await;

        for (id, result) in results {
            match result {
                Ok(()) => report.indexed += 1,
                Err(e) => {
                    tracing::error!("Error populating bookmark {}: {}", id, e);
                    report.failed.push(id.into_inner());
                }
            }
        }
        self.metrics.record_documents_indexed(report.indexed);
        self.metrics.record_store_errors(report.failed.len());

        report
    }

    /// Fetch and store one bookmark.
    async fn index_bookmark(
        &self,
        id: DocumentId,
        bookmark: Bookmark,
    ) -> (DocumentId, StoreResult<()>) {
        let doc = self.fetcher.fetch_document(id.clone(), bookmark).await;
        let result = self.repository.put(&doc).await;
        (id, result)
    }

    /// Rebuild the index and publish readiness from its outcome.
    async fn finish_indexing(&self, mut report: SyncReport) -> SyncResult<SyncReport> {
        match self.repository.rebuild_index().await {
            Ok(()) => {
                self.metrics.record_index_build(true);
                report.index_built = true;
                self.readiness.set(true);
                Ok(report)
            }
            Err(e) => {
                self.metrics.record_index_build(false);
                self.readiness.set(false);
                tracing::error!("Error building search index: {}", e);
                Err(SyncError::IndexBuild(e.to_string()))
            }
        }
    }
}

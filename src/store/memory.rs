//! In-memory document store with an optional JSON snapshot file.

use super::full_text::{tokenize, FullTextIndex};
use super::traits::{DocumentStore, SearchQuery, SearchRow};
use crate::domain::DocumentId;
use crate::error::{StoreError, StoreResult};
use crate::models::{IndexedDocument, Revision, StoredDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use tokio::sync::RwLock;

/// On-disk snapshot layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    documents: Vec<StoredDocument>,
}

#[derive(Debug, Default)]
struct StoreState {
    docs: BTreeMap<DocumentId, StoredDocument>,
    /// `None` whenever a write has happened since the last build
    index: Option<FullTextIndex>,
    closed: bool,
}

impl StoreState {
    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::Unavailable("store is closed".to_string()));
        }
        Ok(())
    }
}

/// Document store kept in memory, ordered by document id.
///
/// When opened with a snapshot path, documents are loaded from it and
/// written back after every index build and on [`close`](Self::close).
pub struct MemoryDocumentStore {
    state: RwLock<StoreState>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryDocumentStore {
    /// Create an empty store that is never persisted.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            snapshot_path: None,
        }
    }

    /// Open a store backed by a snapshot file, loading it if it exists.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let snapshot = match tokio::fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str::<Snapshot>(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };

        let docs = snapshot
            .documents
            .into_iter()
            .map(|stored| (stored.doc.id.clone(), stored))
            .collect::<BTreeMap<_, _>>();

        tracing::info!(
            "Opened document store at {} ({} documents)",
            path.display(),
            docs.len()
        );

        Ok(Self {
            state: RwLock::new(StoreState {
                docs,
                index: None,
                closed: false,
            }),
            snapshot_path: Some(path),
        })
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.state.read().await.docs.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Write the snapshot file, if configured.
    pub async fn flush(&self) -> StoreResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let json = {
            let state = self.state.read().await;
            let snapshot = Snapshot {
                documents: state.docs.values().cloned().collect(),
            };
            serde_json::to_string(&snapshot)?
        };

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        tracing::debug!("Wrote document snapshot to {}", path.display());
        Ok(())
    }

    /// Flush the snapshot and refuse further operations.
    pub async fn close(&self) -> StoreResult<()> {
        self.flush().await?;
        self.state.write().await.closed = true;
        Ok(())
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, doc: &IndexedDocument) -> StoreResult<Revision> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        let rev = match state.docs.get(&doc.id) {
            Some(existing) => Revision(existing.rev.0 + 1),
            None => Revision(1),
        };
        state.docs.insert(
            doc.id.clone(),
            StoredDocument {
                doc: doc.clone(),
                rev,
            },
        );
        state.index = None;

        Ok(rev)
    }

    async fn get(&self, id: &DocumentId) -> StoreResult<StoredDocument> {
        let state = self.state.read().await;
        state.ensure_open()?;
        state
            .docs
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn remove(&self, id: &DocumentId, rev: Revision) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        let current = state
            .docs
            .get(id)
            .map(|stored| stored.rev)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if current != rev {
            return Err(StoreError::Conflict {
                id: id.to_string(),
                expected: rev.0,
                found: current.0,
            });
        }

        state.docs.remove(id);
        state.index = None;
        Ok(())
    }

    async fn list_ids(&self) -> StoreResult<Vec<DocumentId>> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(state.docs.keys().cloned().collect())
    }

    async fn all_documents(&self) -> StoreResult<Vec<IndexedDocument>> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(state.docs.values().map(|stored| stored.doc.clone()).collect())
    }

    async fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchRow>> {
        let rows = {
            let mut state = self.state.write().await;
            state.ensure_open()?;

            let stale = match &state.index {
                Some(index) => !index.covers(&query.fields),
                None => true,
            };
            if query.build || stale {
                let index =
                    FullTextIndex::build(state.docs.values().map(|s| &s.doc), &query.fields);
                tracing::debug!(
                    "Built full-text index: {} documents, {} terms",
                    index.document_count(),
                    index.term_count()
                );
                state.index = Some(index);
            }

            match (&query.query, &state.index) {
                (Some(text), Some(index)) => {
                    let terms: HashSet<String> = tokenize(text).into_iter().collect();
                    let mut rows: Vec<SearchRow> = index
                        .candidates(&terms)
                        .iter()
                        .filter_map(|id| state.docs.get(id))
                        .filter_map(|stored| {
                            index.match_document(&stored.doc, &terms, query.highlighting)
                        })
                        .collect();
                    rows.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.doc.id.cmp(&b.doc.id)));
                    rows
                }
                _ => Vec::new(),
            }
        };

        if query.build {
            self.flush().await?;
        }

        Ok(rows)
    }
}

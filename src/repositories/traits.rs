use crate::domain::DocumentId;
use crate::error::StoreResult;
use crate::models::{IndexedDocument, StoredDocument};
use crate::store::SearchRow;
use async_trait::async_trait;

/// Repository for bookmark page documents.
///
/// Provides the operations the indexing pipeline and the query engine need,
/// on top of the raw store capability.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert or overwrite a document (last write wins).
    async fn put(&self, doc: &IndexedDocument) -> StoreResult<()>;

    /// Retrieve a document with its current revision.
    async fn get(&self, id: &DocumentId) -> StoreResult<StoredDocument>;

    /// Delete a document by id at its current revision.
    async fn delete(&self, id: &DocumentId) -> StoreResult<()>;

    /// Ids of every stored document; empty when the store cannot be read.
    async fn list_ids(&self) -> Vec<DocumentId>;

    /// Every stored document.
    async fn all_documents(&self) -> StoreResult<Vec<IndexedDocument>>;

    /// Highlighted full-text search over content, title and url.
    async fn search_content(&self, text: &str) -> StoreResult<Vec<SearchRow>>;

    /// Recompute the full-text index over title, content and url.
    async fn rebuild_index(&self) -> StoreResult<()>;
}

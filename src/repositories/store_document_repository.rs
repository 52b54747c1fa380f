use crate::domain::DocumentId;
use crate::error::StoreResult;
use crate::models::{IndexedDocument, StoredDocument};
use crate::repositories::traits::DocumentRepository;
use crate::store::{DocumentStore, SearchField, SearchQuery, SearchRow};
use async_trait::async_trait;
use std::sync::Arc;

/// Document repository implementation over a [`DocumentStore`].
///
/// The store handle is shared; this repository adds the delete-by-revision
/// dance and the degrade-to-empty listing.
pub struct StoreDocumentRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreDocumentRepository {
    /// Create a new StoreDocumentRepository with the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DocumentRepository for StoreDocumentRepository {
    async fn put(&self, doc: &IndexedDocument) -> StoreResult<()> {
        self.store.put(doc).await.map(|_| ())
    }

    async fn get(&self, id: &DocumentId) -> StoreResult<StoredDocument> {
        self.store.get(id).await
    }

    async fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        let stored = self.get(id).await?;
        self.store.remove(id, stored.rev).await
    }

    async fn list_ids(&self) -> Vec<DocumentId> {
        self.store.list_ids().await.unwrap_or_else(|e| {
            tracing::error!("Error while fetching ids from store: {}", e);
            Vec::new()
        })
    }

    async fn all_documents(&self) -> StoreResult<Vec<IndexedDocument>> {
        self.store.all_documents().await
    }

    async fn search_content(&self, text: &str) -> StoreResult<Vec<SearchRow>> {
        self.store
            .search(&SearchQuery::highlighted(text, &SearchField::ALL))
            .await
    }

    async fn rebuild_index(&self) -> StoreResult<()> {
        self.store
            .search(&SearchQuery::build_only(&SearchField::ALL))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryDocumentStore;

    fn repository() -> (Arc<MemoryDocumentStore>, StoreDocumentRepository) {
        let store = Arc::new(MemoryDocumentStore::new());
        let repo = StoreDocumentRepository::new(store.clone() as Arc<dyn DocumentStore>);
        (store, repo)
    }

    fn doc(bookmark_id: &str, url: &str) -> IndexedDocument {
        IndexedDocument {
            id: DocumentId::for_bookmark(bookmark_id, url).unwrap(),
            title: format!("Bookmark {}", bookmark_id),
            url: url.to_string(),
            content: None,
        }
    }

    #[tokio::test]
    async fn test_delete_after_overwrite() {
        let (store, repo) = repository();
        let d = doc("1", "https://a.example");
        repo.put(&d).await.unwrap();
        repo.put(&d).await.unwrap();

        repo.delete(&d.id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_returns_current_revision() {
        let (_, repo) = repository();
        let d = doc("1", "https://a.example");
        repo.put(&d).await.unwrap();
        repo.put(&d).await.unwrap();

        let stored = repo.get(&d.id).await.unwrap();
        assert_eq!(stored.rev.0, 2);
        assert_eq!(stored.doc, d);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (_, repo) = repository();
        let id = DocumentId::for_bookmark("404", "https://gone.example").unwrap();
        assert!(matches!(repo.delete(&id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_ids_degrades_to_empty() {
        let (store, repo) = repository();
        repo.put(&doc("1", "https://a.example")).await.unwrap();
        assert_eq!(repo.list_ids().await.len(), 1);

        store.close().await.unwrap();
        assert!(repo.list_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_then_search() {
        let (_, repo) = repository();
        repo.put(&doc("1", "https://rust-lang.org")).await.unwrap();
        repo.rebuild_index().await.unwrap();

        let rows = repo.search_content("bookmark").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0]
            .highlighting
            .get(&SearchField::Title)
            .unwrap()
            .contains("<strong>Bookmark</strong>"));
    }
}

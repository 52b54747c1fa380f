use async_trait::async_trait;
use bookmark_search::domain::DocumentId;
use bookmark_search::error::{StoreError, StoreResult};
use bookmark_search::models::{IndexedDocument, Revision, StoredDocument};
use bookmark_search::repositories::DocumentRepository;
use bookmark_search::store::full_text::tokenize;
use bookmark_search::store::{FullTextIndex, SearchField, SearchRow};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock document repository for testing.
///
/// Keeps documents in memory, records every write, delete and rebuild in an
/// event log, and can be told to fail individual operations.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDocumentRepository {
    docs: Arc<Mutex<BTreeMap<DocumentId, StoredDocument>>>,
    events: Arc<Mutex<Vec<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing_puts: Arc<Mutex<HashSet<String>>>,
    fail_rebuild: Arc<Mutex<bool>>,
    fail_reads: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without recording an event.
    pub fn add_document(&self, doc: IndexedDocument) {
        self.docs.lock().unwrap().insert(
            doc.id.clone(),
            StoredDocument {
                doc,
                rev: Revision(1),
            },
        );
    }

    /// Stored document ids, in id order.
    pub fn ids(&self) -> Vec<DocumentId> {
        self.docs.lock().unwrap().keys().cloned().collect()
    }

    /// A stored document by id.
    pub fn document(&self, id: &DocumentId) -> Option<IndexedDocument> {
        self.docs.lock().unwrap().get(id).map(|s| s.doc.clone())
    }

    /// Event log: `put:<id>`, `delete:<id>`, `rebuild`.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        *self.call_counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    /// Make `put` fail for the given document id.
    pub fn fail_put_for(&self, id: &DocumentId) {
        self.failing_puts
            .lock()
            .unwrap()
            .insert(id.as_str().to_string());
    }

    /// Make `rebuild_index` fail (or succeed again).
    pub fn set_fail_rebuild(&self, fail: bool) {
        *self.fail_rebuild.lock().unwrap() = fail;
    }

    /// Make `list_ids`, `all_documents` and `search_content` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    fn track_call(&self, method: &str) {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_insert(0) += 1;
    }

    fn reads_fail(&self) -> bool {
        *self.fail_reads.lock().unwrap()
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn put(&self, doc: &IndexedDocument) -> StoreResult<()> {
        self.track_call("put");

        if self.failing_puts.lock().unwrap().contains(doc.id.as_str()) {
            return Err(StoreError::Unavailable("put rejected".to_string()));
        }

        let mut docs = self.docs.lock().unwrap();
        let rev = docs.get(&doc.id).map(|s| s.rev.0 + 1).unwrap_or(1);
        docs.insert(
            doc.id.clone(),
            StoredDocument {
                doc: doc.clone(),
                rev: Revision(rev),
            },
        );
        self.events.lock().unwrap().push(format!("put:{}", doc.id));
        Ok(())
    }

    async fn get(&self, id: &DocumentId) -> StoreResult<StoredDocument> {
        self.track_call("get");
        self.docs
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        self.track_call("delete");
        self.docs
            .lock()
            .unwrap()
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.events.lock().unwrap().push(format!("delete:{}", id));
        Ok(())
    }

    async fn list_ids(&self) -> Vec<DocumentId> {
        self.track_call("list_ids");
        if self.reads_fail() {
            return Vec::new();
        }
        self.ids()
    }

    async fn all_documents(&self) -> StoreResult<Vec<IndexedDocument>> {
        self.track_call("all_documents");
        if self.reads_fail() {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(self
            .docs
            .lock()
            .unwrap()
            .values()
            .map(|s| s.doc.clone())
            .collect())
    }

    async fn search_content(&self, text: &str) -> StoreResult<Vec<SearchRow>> {
        self.track_call("search_content");
        if self.reads_fail() {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }

        let docs = self.docs.lock().unwrap();
        let index = FullTextIndex::build(docs.values().map(|s| &s.doc), &SearchField::ALL);
        let terms: HashSet<String> = tokenize(text).into_iter().collect();

        Ok(index
            .candidates(&terms)
            .iter()
            .filter_map(|id| docs.get(id))
            .filter_map(|s| index.match_document(&s.doc, &terms, true))
            .collect())
    }

    async fn rebuild_index(&self) -> StoreResult<()> {
        self.track_call("rebuild_index");
        self.events.lock().unwrap().push("rebuild".to_string());
        if *self.fail_rebuild.lock().unwrap() {
            return Err(StoreError::IndexBuild("mock rebuild failure".to_string()));
        }
        Ok(())
    }
}

use crate::domain::DocumentId;
use crate::error::StoreResult;
use crate::models::{IndexedDocument, Revision, StoredDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A searchable document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Url,
    Content,
}

impl SearchField {
    /// Every field, in the order the index covers them.
    pub const ALL: [SearchField; 3] = [Self::Content, Self::Title, Self::Url];

    /// The value of this field in a document.
    pub fn value<'a>(&self, doc: &'a IndexedDocument) -> &'a str {
        match self {
            Self::Title => &doc.title,
            Self::Url => &doc.url,
            Self::Content => doc.content_str(),
        }
    }
}

/// Parameters of a store search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Fields to index and search
    pub fields: Vec<SearchField>,

    /// Free-text query; `None` for a build-only request
    pub query: Option<String>,

    /// Whether matched words should be wrapped in highlight markers
    pub highlighting: bool,

    /// Force the full-text index to be rebuilt before answering
    pub build: bool,
}

impl SearchQuery {
    /// A request that only rebuilds the index over the given fields.
    pub fn build_only(fields: &[SearchField]) -> Self {
        Self {
            fields: fields.to_vec(),
            query: None,
            highlighting: false,
            build: true,
        }
    }

    /// A highlighted full-text query over the given fields.
    pub fn highlighted(query: impl Into<String>, fields: &[SearchField]) -> Self {
        Self {
            fields: fields.to_vec(),
            query: Some(query.into()),
            highlighting: true,
            build: false,
        }
    }
}

/// One document matched by a store search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRow {
    pub doc: IndexedDocument,

    /// Number of query term occurrences across the searched fields
    pub score: usize,

    /// Highlighted field values; only fields containing a match are present
    pub highlighting: HashMap<SearchField, String>,
}

/// The persistent document store and its full-text search capability.
///
/// Writes are revisioned: removing a document requires its current revision.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or overwrite a document, returning its new revision.
    async fn put(&self, doc: &IndexedDocument) -> StoreResult<Revision>;

    /// Retrieve a document with its current revision.
    async fn get(&self, id: &DocumentId) -> StoreResult<StoredDocument>;

    /// Remove a document at the given revision.
    async fn remove(&self, id: &DocumentId, rev: Revision) -> StoreResult<()>;

    /// Ids of every stored document, in id order.
    async fn list_ids(&self) -> StoreResult<Vec<DocumentId>>;

    /// Every stored document, in id order.
    async fn all_documents(&self) -> StoreResult<Vec<IndexedDocument>>;

    /// Full-text search; with `build` set the index is recomputed first.
    async fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchRow>>;
}

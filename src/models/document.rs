//! Documents held by the document store.

use crate::domain::DocumentId;
use crate::models::Bookmark;
use serde::{Deserialize, Serialize};

/// A fetched bookmark page, as stored and searched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedDocument {
    /// Identity derived from the bookmark's url and id
    pub id: DocumentId,

    /// Bookmark title
    pub title: String,

    /// Bookmark url
    pub url: String,

    /// Extracted page text, an "unavailable" placeholder, or nothing when
    /// the page could not be fetched at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl IndexedDocument {
    /// Build the document for a bookmark with the given content.
    pub fn new(id: DocumentId, bookmark: &Bookmark, content: Option<String>) -> Self {
        Self {
            id,
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            content,
        }
    }

    /// Content as a string slice, empty when absent.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Revision counter assigned by the store on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision(pub u64);

/// A document together with its current store revision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredDocument {
    pub doc: IndexedDocument,
    pub rev: Revision,
}

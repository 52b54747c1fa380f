//! Data models for bookmarks, stored documents and search results.

pub mod bookmark;
pub mod document;
pub mod search_result;

pub use bookmark::{Bookmark, BookmarkRef};
pub use document::{IndexedDocument, Revision, StoredDocument};
pub use search_result::SearchResult;

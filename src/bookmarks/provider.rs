//! Bookmark tree providers.

use crate::error::{BookmarkError, BookmarkResult};
use crate::models::BookmarkRef;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// Read access to the host's bookmark tree.
#[async_trait]
pub trait BookmarkProvider: Send + Sync {
    /// Return the root node of the current bookmark tree.
    async fn get_tree(&self) -> BookmarkResult<BookmarkRef>;
}

/// Exported tree files hold either a single root or the host's array of roots.
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeFile {
    Roots(Vec<BookmarkRef>),
    Root(BookmarkRef),
}

/// Bookmark provider backed by an exported JSON tree file.
///
/// The file is re-read on every call so that removals made by the host are
/// visible to reconciliation.
pub struct JsonBookmarkProvider {
    path: PathBuf,
}

impl JsonBookmarkProvider {
    /// Create a provider reading the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a bookmark tree document, taking the first root of an array.
pub fn parse_tree(json: &str) -> BookmarkResult<BookmarkRef> {
    match serde_json::from_str::<TreeFile>(json)? {
        TreeFile::Root(root) => Ok(root),
        TreeFile::Roots(roots) => roots.into_iter().next().ok_or(BookmarkError::EmptyTree),
    }
}

#[async_trait]
impl BookmarkProvider for JsonBookmarkProvider {
    async fn get_tree(&self) -> BookmarkResult<BookmarkRef> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        parse_tree(&json)
    }
}

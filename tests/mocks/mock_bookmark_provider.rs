use async_trait::async_trait;
use bookmark_search::bookmarks::BookmarkProvider;
use bookmark_search::error::{BookmarkError, BookmarkResult};
use bookmark_search::models::BookmarkRef;
use std::sync::{Arc, Mutex};

/// Mock bookmark provider serving a replaceable in-memory tree.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockBookmarkProvider {
    tree: Arc<Mutex<Option<BookmarkRef>>>,
    calls: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockBookmarkProvider {
    /// Create a provider serving the given tree.
    pub fn new(root: BookmarkRef) -> Self {
        let provider = Self::default();
        provider.set_tree(root);
        provider
    }

    /// Create a provider whose tree cannot be read.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Replace the served tree, as the host does after an edit.
    pub fn set_tree(&self, root: BookmarkRef) {
        *self.tree.lock().unwrap() = Some(root);
    }

    /// Number of `get_tree` calls so far.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl BookmarkProvider for MockBookmarkProvider {
    async fn get_tree(&self) -> BookmarkResult<BookmarkRef> {
        *self.calls.lock().unwrap() += 1;
        self.tree
            .lock()
            .unwrap()
            .clone()
            .ok_or(BookmarkError::EmptyTree)
    }
}

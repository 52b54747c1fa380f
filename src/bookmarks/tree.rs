//! Walking the bookmark tree.

use crate::domain::DocumentId;
use crate::models::{Bookmark, BookmarkRef};
use std::collections::HashSet;

/// Pre-order, depth-first iterator over the leaves of a bookmark tree.
///
/// The root is visited first, then each child subtree in order. The walk
/// holds its own stack, so calling [`BookmarkRef::leaves`] again restarts it.
pub struct Leaves<'a> {
    stack: Vec<&'a BookmarkRef>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a BookmarkRef;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Some(children) = &node.children {
                self.stack.extend(children.iter().rev());
            }
            if node.is_leaf() {
                return Some(node);
            }
        }
        None
    }
}

impl BookmarkRef {
    /// Lazily enumerate the leaves below (and including) this node.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }
}

/// Owned leaf bookmarks of a tree, in walk order.
pub fn collect_bookmarks(root: &BookmarkRef) -> Vec<Bookmark> {
    root.leaves().filter_map(BookmarkRef::as_bookmark).collect()
}

/// Every document id derivable from the leaves of a tree.
///
/// Leaves whose id or url is empty have no identity and are skipped.
pub fn reachable_document_ids(root: &BookmarkRef) -> HashSet<DocumentId> {
    root.leaves()
        .filter_map(|node| {
            let url = node.url.as_deref()?;
            DocumentId::for_bookmark(&node.id, url).ok()
        })
        .collect()
}

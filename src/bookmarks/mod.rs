//! Access to the host bookmark tree.
//!
//! The provider trait abstracts where the tree comes from; the tree module
//! walks it to find leaves and their document identities.

mod provider;
pub mod tree;

pub use provider::{parse_tree, BookmarkProvider, JsonBookmarkProvider};
pub use tree::{collect_bookmarks, reachable_document_ids, Leaves};

//! Bookmark Search - full-text search over the pages behind a bookmark tree.
//!
//! Every bookmarked page is fetched, reduced to its visible body text and
//! stored with the bookmark's title and url. Queries combine a literal url
//! scan with highlighted full-text search, merged into one result per url.
//! The whole thing is served to AI assistants as an MCP server over stdio.
//!
//! # Architecture
//!
//! - **bookmarks**: Bookmark tree source and depth-first leaf traversal
//! - **fetcher**: HTTP page fetcher and body text extraction
//! - **store**: Revisioned document store with a full-text index
//! - **repositories**: Document operations used by indexing and search
//! - **sync**: Index synchronizer and its single-writer worker
//! - **search**: Query engine, result merging and display helpers
//! - **readiness**: Watchable "index is ready" flag
//! - **services**: Validation and response shaping for the MCP tools
//! - **server**: MCP protocol server

pub mod bookmarks;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod models;
pub mod readiness;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod store;
pub mod sync;

pub use config::{Config, DisplaySettings};
pub use domain::DocumentId;
pub use error::{
    BookmarkError, ConfigError, FetchError, SearchError, StoreError, SyncError,
};
pub use metrics::{FetchTimer, Metrics, MetricsSummary};
pub use models::{Bookmark, BookmarkRef, IndexedDocument, SearchResult};
pub use readiness::{Readiness, ReadinessSignal, ReadinessWatcher};
pub use search::{DisplayResult, QueryEngine};
pub use server::BookmarkSearchServer;
pub use sync::{spawn_synchronizer, IndexSynchronizer, SyncHandle, SyncReport, SyncTrigger};

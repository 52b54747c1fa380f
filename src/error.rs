//! Error types for the bookmark search server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur while fetching a bookmarked page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status code
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors that can occur when talking to the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with the given id
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Revision did not match the stored document
    #[error("Revision conflict for {id}: expected {expected}, found {found}")]
    Conflict {
        id: String,
        expected: u64,
        found: u64,
    },

    /// Snapshot file could not be read or written
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file could not be (de)serialized
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Full-text index could not be built
    #[error("Index build failed: {0}")]
    IndexBuild(String),

    /// Store is closed or otherwise unusable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while reading the bookmark tree.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// Tree file could not be read
    #[error("Failed to read bookmark tree: {0}")]
    Io(#[from] std::io::Error),

    /// Tree file is not valid bookmark JSON
    #[error("Failed to parse bookmark tree: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tree file contains no root node
    #[error("Bookmark tree is empty")]
    EmptyTree,
}

/// Errors that abort an index synchronization run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The bookmark tree could not be read
    #[error("Bookmark provider error: {0}")]
    Bookmarks(#[from] BookmarkError),

    /// The full-text index rebuild failed
    #[error("Index rebuild failed: {0}")]
    IndexBuild(String),

    /// The synchronizer worker is no longer running
    #[error("Synchronizer queue closed")]
    QueueClosed,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Index not ready
    #[error("Search index not ready")]
    IndexNotReady,

    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// Search execution failed
    #[error("Search execution failed: {0}")]
    ExecutionError(String),
}

/// Convenience type alias for Results with FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with BookmarkError
pub type BookmarkResult<T> = Result<T, BookmarkError>;

/// Convenience type alias for Results with SyncError
pub type SyncResult<T> = Result<T, SyncError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type QueryResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound("example.com/|1".to_string());
        assert_eq!(err.to_string(), "Document not found: example.com/|1");

        let err = ConfigError::MissingVar("BOOKMARKS_FILE".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: BOOKMARKS_FILE"
        );

        let err = SearchError::IndexNotReady;
        assert_eq!(err.to_string(), "Search index not ready");

        let err = BookmarkError::EmptyTree;
        assert_eq!(err.to_string(), "Bookmark tree is empty");
    }

    #[test]
    fn test_fetch_status_error() {
        let err = FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_sync_error_from_bookmark_error() {
        let err: SyncError = BookmarkError::EmptyTree.into();
        assert!(matches!(err, SyncError::Bookmarks(BookmarkError::EmptyTree)));
    }

    #[test]
    fn test_conflict_display() {
        let err = StoreError::Conflict {
            id: "a|1".to_string(),
            expected: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Revision conflict for a|1: expected 1, found 2"
        );
    }
}

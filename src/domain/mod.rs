//! Domain value objects and types.
//!
//! Type-safe wrappers for identities that must be derived consistently
//! everywhere a bookmark is mapped to a stored document.

pub mod document_id;
pub mod errors;

pub use document_id::{normalize_url, DocumentId};
pub use errors::ValidationError;

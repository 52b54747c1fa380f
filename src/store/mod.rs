//! Document store capability.
//!
//! The store owns every indexed document and answers full-text queries.
//! [`DocumentStore`] is the seam; [`MemoryDocumentStore`] is the shipped
//! implementation.

pub mod full_text;
mod memory;
mod traits;

pub use full_text::{FullTextIndex, HIGHLIGHT_END, HIGHLIGHT_START};
pub use memory::MemoryDocumentStore;
pub use traits::{DocumentStore, SearchField, SearchQuery, SearchRow};

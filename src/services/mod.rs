//! Application service layer.
//!
//! Services sit between the MCP handlers and the search/index machinery:
//! they validate input, gate search on readiness and shape responses.

mod index_service;
mod search_service;

pub use index_service::{IndexService, IndexServiceImpl, IndexStatus};
pub use search_service::{SearchResponse, SearchService, SearchServiceImpl};

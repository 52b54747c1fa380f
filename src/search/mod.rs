//! Query answering: strategy fan-out, result merging and display helpers.

mod merge;
pub mod presentation;
mod query_engine;

pub use merge::merge_results;
pub use presentation::{plain_title, results_summary, trim_content, trim_title, DisplayResult};
pub use query_engine::QueryEngine;

//! Search result model.

use serde::Serialize;

/// A single search hit shown to the user.
///
/// `title` and `content` may contain `<strong>` highlight markers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchResult {
    /// Create a new search result.
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

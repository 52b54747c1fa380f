//! Display helpers for search results.

use crate::config::DisplaySettings;
use crate::models::SearchResult;
use crate::store::{HIGHLIGHT_END, HIGHLIGHT_START};
use serde::Serialize;

const LEADING_ELLIPSIS: &str = "... ";
const TRAILING_ELLIPSIS: &str = " ...";

/// Keep the first `max_words` space-delimited words of a title.
///
/// Longer titles get a trailing ` ...`.
pub fn trim_title(title: &str, max_words: usize) -> String {
    let words: Vec<&str> = title.split(' ').collect();
    if words.len() <= max_words {
        return title.to_string();
    }
    format!("{}{}", words[..max_words].join(" "), TRAILING_ELLIPSIS)
}

/// Cut a snippet window around the first highlight marker.
///
/// The window starts `before` characters ahead of the marker and ends
/// `after` characters past the marker start, clamped to the field. Ellipses
/// mark each side where the window stops short of the field boundary.
/// Content without a marker is returned unchanged.
pub fn trim_content(content: &str, before: usize, after: usize) -> String {
    let Some(byte_pos) = content.find(HIGHLIGHT_START) else {
        return content.to_string();
    };

    let chars: Vec<char> = content.chars().collect();
    let marker = content[..byte_pos].chars().count();

    let start = marker.saturating_sub(before);
    let end = (marker + after).min(chars.len());

    let mut snippet = String::with_capacity(end - start + 8);
    if start > 0 {
        snippet.push_str(LEADING_ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(TRAILING_ELLIPSIS);
    }
    snippet
}

/// A title with highlight markers removed.
pub fn plain_title(title: &str) -> String {
    title.replace(HIGHLIGHT_START, "").replace(HIGHLIGHT_END, "")
}

/// A search result ready for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayResult {
    /// Truncated title, highlights kept
    pub title: String,

    /// Complete title without highlight markers
    pub full_title: String,

    pub url: String,

    /// Snippet around the first highlight, or empty
    pub content: String,
}

impl DisplayResult {
    /// Prepare a merged result for display.
    pub fn present(result: SearchResult, settings: &DisplaySettings) -> Self {
        Self {
            title: trim_title(&result.title, settings.max_title_words),
            full_title: plain_title(&result.title),
            url: result.url,
            content: result.content.trim().to_string(),
        }
    }
}

/// Human-readable result count.
pub fn results_summary(count: usize) -> String {
    match count {
        0 => "No results found".to_string(),
        1 => "1 result found".to_string(),
        n => format!("{} results found", n),
    }
}

//! Visible text extraction from fetched markup.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static SCRIPT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("Failed to compile script regex")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\s+").expect("Failed to compile whitespace regex"));

static BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Failed to parse body selector"));

/// Remove every `<script>` element, including its contents.
///
/// An unterminated `<script>` swallows the rest of the document, as a
/// browser parser would.
pub fn strip_scripts(html: &str) -> String {
    let stripped = SCRIPT_ELEMENT.replace_all(html, "");
    match find_ascii_case_insensitive(&stripped, "<script") {
        Some(pos) => stripped[..pos].to_string(),
        None => stripped.into_owned(),
    }
}

/// Extract the text content of `<body>` with whitespace runs collapsed.
///
/// Scripts are removed before parsing so their source never reaches the
/// index.
pub fn extract_body_text(html: &str) -> String {
    let document = Html::parse_document(&strip_scripts(html));
    let text: String = document
        .select(&BODY)
        .next()
        .map(|body| body.text().collect())
        .unwrap_or_default();

    WHITESPACE_RUN.replace_all(&text, " ").into_owned()
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

//! Full-text index over stored documents.
//!
//! Term matching is exact on lowercase alphanumeric words; a document
//! matches when any query term occurs in any indexed field.

use super::traits::{SearchField, SearchRow};
use crate::domain::DocumentId;
use crate::models::IndexedDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Marker inserted before a highlighted word.
pub const HIGHLIGHT_START: &str = "<strong>";

/// Marker inserted after a highlighted word.
pub const HIGHLIGHT_END: &str = "</strong>";

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Failed to compile word regex"));

/// Split text into lowercase terms.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Wrap every word of `text` that is one of `terms` in highlight markers.
///
/// Returns the highlighted text and the number of words wrapped.
pub fn highlight(text: &str, terms: &HashSet<String>) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut hits = 0;

    for word in WORD.find_iter(text) {
        if terms.contains(&word.as_str().to_lowercase()) {
            out.push_str(&text[last..word.start()]);
            out.push_str(HIGHLIGHT_START);
            out.push_str(word.as_str());
            out.push_str(HIGHLIGHT_END);
            last = word.end();
            hits += 1;
        }
    }
    out.push_str(&text[last..]);

    (out, hits)
}

/// Inverted index from terms to the documents containing them.
#[derive(Debug, Clone, Default)]
pub struct FullTextIndex {
    fields: Vec<SearchField>,
    postings: HashMap<String, BTreeSet<DocumentId>>,
    document_count: usize,
}

impl FullTextIndex {
    /// Build the index over the given fields of every document.
    pub fn build<'a>(
        docs: impl IntoIterator<Item = &'a IndexedDocument>,
        fields: &[SearchField],
    ) -> Self {
        let mut postings: HashMap<String, BTreeSet<DocumentId>> = HashMap::new();
        let mut document_count = 0;

        for doc in docs {
            document_count += 1;
            for field in fields {
                for term in tokenize(field.value(doc)) {
                    postings.entry(term).or_default().insert(doc.id.clone());
                }
            }
        }

        Self {
            fields: fields.to_vec(),
            postings,
            document_count,
        }
    }

    /// Whether this index was built over exactly these fields.
    pub fn covers(&self, fields: &[SearchField]) -> bool {
        self.fields == fields
    }

    /// Number of documents indexed.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Ids of documents containing at least one of the terms.
    pub fn candidates(&self, terms: &HashSet<String>) -> BTreeSet<DocumentId> {
        terms
            .iter()
            .filter_map(|term| self.postings.get(term))
            .flatten()
            .cloned()
            .collect()
    }

    /// Score a candidate document and build its highlighting.
    ///
    /// Returns `None` when no field contains a query term.
    pub fn match_document(
        &self,
        doc: &IndexedDocument,
        terms: &HashSet<String>,
        highlighting: bool,
    ) -> Option<SearchRow> {
        let mut score = 0;
        let mut highlights = HashMap::new();

        for field in &self.fields {
            let (marked, hits) = highlight(field.value(doc), terms);
            if hits > 0 {
                score += hits;
                if highlighting {
                    highlights.insert(*field, marked);
                }
            }
        }

        (score > 0).then(|| SearchRow {
            doc: doc.clone(),
            score,
            highlighting: highlights,
        })
    }
}

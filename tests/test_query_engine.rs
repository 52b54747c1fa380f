//! Integration tests for the query engine.

mod mocks;

use bookmark_search::domain::DocumentId;
use bookmark_search::models::{IndexedDocument, SearchResult};
use bookmark_search::{DisplaySettings, Metrics, QueryEngine};
use mocks::MockDocumentRepository;
use std::sync::Arc;

fn doc(bookmark_id: &str, url: &str, title: &str, content: Option<&str>) -> IndexedDocument {
    IndexedDocument {
        id: DocumentId::for_bookmark(bookmark_id, url).unwrap(),
        title: title.to_string(),
        url: url.to_string(),
        content: content.map(str::to_string),
    }
}

fn engine(repository: &MockDocumentRepository) -> QueryEngine {
    QueryEngine::new(
        Arc::new(repository.clone()),
        DisplaySettings::default(),
        Metrics::new(),
    )
}

fn seeded() -> MockDocumentRepository {
    let repository = MockDocumentRepository::new();
    repository.add_document(doc(
        "1",
        "https://docs.rs/serde",
        "serde - Rust",
        Some("A generic serialization framework"),
    ));
    repository.add_document(doc(
        "2",
        "https://serde.rs",
        "Overview",
        Some("Serde is a framework for serializing and deserializing Rust data structures"),
    ));
    repository.add_document(doc(
        "3",
        "https://tokio.rs",
        "Tokio",
        Some("An asynchronous runtime"),
    ));
    repository
}

#[tokio::test]
async fn test_empty_query_touches_nothing() {
    let repository = seeded();
    let engine = engine(&repository);

    assert!(engine.search("").await.is_empty());
    assert!(engine.search(" \t ").await.is_empty());
    assert_eq!(repository.get_call_count("all_documents"), 0);
    assert_eq!(repository.get_call_count("search_content"), 0);
}

#[tokio::test]
async fn test_one_result_per_url() {
    let repository = seeded();
    let engine = engine(&repository);

    let results = engine.search("serde").await;

    // Url hits come first, then full-text hits not already seen
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["https://docs.rs/serde", "https://serde.rs"]);

    assert_eq!(results[0].title, "<strong>serde</strong> - Rust");
    assert_eq!(results[1].title, "Overview");
    assert_eq!(
        results[1].content,
        "<strong>Serde</strong> is a framework fo ..."
    );
}

#[tokio::test]
async fn test_url_and_title_hits_collapse() {
    let repository = seeded();
    let engine = engine(&repository);

    let results = engine.search("tokio").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://tokio.rs");
    assert_eq!(results[0].title, "<strong>Tokio</strong>");
    assert!(results[0].content.is_empty());
}

#[tokio::test]
async fn test_store_failures_are_absorbed() {
    let repository = seeded();
    let engine = engine(&repository);
    repository.set_fail_reads(true);

    assert!(engine.search("serde").await.is_empty());

    repository.set_fail_reads(false);
    assert_eq!(engine.search("docs").await.len(), 1);
}

#[tokio::test]
async fn test_no_match() {
    let repository = seeded();
    let engine = engine(&repository);

    assert_eq!(engine.search("haskell").await, Vec::<SearchResult>::new());
}

//! Bookmark Search - Main entry point
//!
//! Indexes the pages behind an exported bookmark tree and serves full-text
//! search over them as an MCP server on stdio.

use anyhow::Result;
use bookmark_search::bookmarks::{BookmarkProvider, JsonBookmarkProvider};
use bookmark_search::fetcher::{AsyncPageFetcher, AsyncPageFetcherImpl, PageFetcher};
use bookmark_search::repositories::{DocumentRepository, StoreDocumentRepository};
use bookmark_search::services::{
    IndexService, IndexServiceImpl, SearchService, SearchServiceImpl,
};
use bookmark_search::store::{DocumentStore, MemoryDocumentStore};
use bookmark_search::{
    spawn_synchronizer, BookmarkSearchServer, Config, IndexSynchronizer, Metrics, QueryEngine,
    ReadinessSignal, SyncTrigger,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration first: LOG_LEVEL feeds the fallback log filter
    let config = Config::from_env();
    let fallback_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // stderr only; stdout carries MCP traffic
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting bookmark search with bookmarks file: {}",
        config.bookmarks_file.display()
    );

    let metrics = Metrics::new();
    let readiness = ReadinessSignal::new();

    let store = Arc::new(match &config.store_path {
        Some(path) => {
            info!("Using document snapshot: {}", path.display());
            MemoryDocumentStore::open(path).await?
        }
        None => MemoryDocumentStore::new(),
    });

    let repository = Arc::new(StoreDocumentRepository::new(
        store.clone() as Arc<dyn DocumentStore>
    )) as Arc<dyn DocumentRepository>;
    let provider = Arc::new(JsonBookmarkProvider::new(config.bookmarks_file.clone()))
        as Arc<dyn BookmarkProvider>;
    let fetcher = Arc::new(AsyncPageFetcherImpl::new(PageFetcher::new(
        &config,
        metrics.clone(),
    ))) as Arc<dyn AsyncPageFetcher>;

    let synchronizer = Arc::new(IndexSynchronizer::new(
        provider,
        fetcher,
        repository.clone(),
        readiness.clone(),
        metrics.clone(),
    ));
    let (sync, worker) = spawn_synchronizer(synchronizer);
    sync.submit(SyncTrigger::Startup)?;

    let mut watcher = readiness.subscribe();
    tokio::spawn(async move {
        if let Ok(state) = watcher.wait_until_ready().await {
            info!(
                "Search index ready at {}",
                state.ready_since.map(|t| t.to_rfc3339()).unwrap_or_default()
            );
        }
    });

    let engine = Arc::new(QueryEngine::new(
        repository.clone(),
        config.display,
        metrics.clone(),
    ));
    let search_service =
        Arc::new(SearchServiceImpl::new(engine, readiness.clone())) as Arc<dyn SearchService>;
    let index_service = Arc::new(IndexServiceImpl::new(
        sync,
        repository,
        readiness,
        metrics.clone(),
    )) as Arc<dyn IndexService>;

    let server = BookmarkSearchServer::new(search_service, index_service);

    info!("Starting MCP server with stdio transport");
    let served = bookmark_search::server::run_server(server).await;

    // Runs already queued are abandoned with the runtime
    worker.abort();
    if let Err(e) = store.close().await {
        error!("Failed to close document store: {}", e);
    }

    let summary = metrics.summary();
    info!(
        "Shutdown complete: {} pages fetched, {} documents indexed, {} searches",
        summary.pages_fetched_total, summary.documents_indexed_total, summary.searches_total
    );
    served
}

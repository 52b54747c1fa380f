//! Basic metrics instrumentation for indexing and search.
//!
//! Provides counters and duration tracking for page fetches, store writes,
//! index rebuilds and queries.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the fetcher, synchronizer and query engine.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of page fetches attempted
    pages_fetched_total: Arc<AtomicU64>,

    /// Page fetches that produced no usable content
    fetch_errors_total: Arc<AtomicU64>,

    /// Total duration of all page fetches in milliseconds
    fetch_duration_total_ms: Arc<AtomicU64>,

    /// Documents written to the store
    documents_indexed_total: Arc<AtomicU64>,

    /// Documents removed from the store
    documents_removed_total: Arc<AtomicU64>,

    /// Failed store writes and deletes
    store_errors_total: Arc<AtomicU64>,

    /// Successful index rebuilds
    index_builds_total: Arc<AtomicU64>,

    /// Failed index rebuilds
    index_build_errors_total: Arc<AtomicU64>,

    /// Search queries served
    searches_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            pages_fetched_total: Arc::new(AtomicU64::new(0)),
            fetch_errors_total: Arc::new(AtomicU64::new(0)),
            fetch_duration_total_ms: Arc::new(AtomicU64::new(0)),
            documents_indexed_total: Arc::new(AtomicU64::new(0)),
            documents_removed_total: Arc::new(AtomicU64::new(0)),
            store_errors_total: Arc::new(AtomicU64::new(0)),
            index_builds_total: Arc::new(AtomicU64::new(0)),
            index_build_errors_total: Arc::new(AtomicU64::new(0)),
            searches_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a page fetch with duration.
    pub fn record_fetch(&self, duration: Duration) {
        self.pages_fetched_total.fetch_add(1, Ordering::Relaxed);
        self.fetch_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a failed page fetch.
    pub fn record_fetch_error(&self) {
        self.fetch_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record documents written to the store.
    pub fn record_documents_indexed(&self, count: usize) {
        self.documents_indexed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record documents removed from the store.
    pub fn record_documents_removed(&self, count: usize) {
        self.documents_removed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record failed store operations.
    pub fn record_store_errors(&self, count: usize) {
        self.store_errors_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record the outcome of an index rebuild.
    pub fn record_index_build(&self, success: bool) {
        if success {
            self.index_builds_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.index_build_errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a served search query.
    pub fn record_search(&self) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total page fetches.
    pub fn pages_fetched_total(&self) -> u64 {
        self.pages_fetched_total.load(Ordering::Relaxed)
    }

    /// Get total failed page fetches.
    pub fn fetch_errors_total(&self) -> u64 {
        self.fetch_errors_total.load(Ordering::Relaxed)
    }

    /// Get average page fetch duration in milliseconds.
    pub fn fetch_duration_avg_ms(&self) -> f64 {
        let total = self.fetch_duration_total_ms.load(Ordering::Relaxed);
        let count = self.pages_fetched_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total documents written.
    pub fn documents_indexed_total(&self) -> u64 {
        self.documents_indexed_total.load(Ordering::Relaxed)
    }

    /// Get total documents removed.
    pub fn documents_removed_total(&self) -> u64 {
        self.documents_removed_total.load(Ordering::Relaxed)
    }

    /// Get total failed store operations.
    pub fn store_errors_total(&self) -> u64 {
        self.store_errors_total.load(Ordering::Relaxed)
    }

    /// Get total successful index rebuilds.
    pub fn index_builds_total(&self) -> u64 {
        self.index_builds_total.load(Ordering::Relaxed)
    }

    /// Get total failed index rebuilds.
    pub fn index_build_errors_total(&self) -> u64 {
        self.index_build_errors_total.load(Ordering::Relaxed)
    }

    /// Get total search queries.
    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            pages_fetched_total: self.pages_fetched_total(),
            fetch_errors_total: self.fetch_errors_total(),
            fetch_duration_avg_ms: self.fetch_duration_avg_ms(),
            documents_indexed_total: self.documents_indexed_total(),
            documents_removed_total: self.documents_removed_total(),
            store_errors_total: self.store_errors_total(),
            index_builds_total: self.index_builds_total(),
            index_build_errors_total: self.index_build_errors_total(),
            searches_total: self.searches_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub pages_fetched_total: u64,
    pub fetch_errors_total: u64,
    pub fetch_duration_avg_ms: f64,
    pub documents_indexed_total: u64,
    pub documents_removed_total: u64,
    pub store_errors_total: u64,
    pub index_builds_total: u64,
    pub index_build_errors_total: u64,
    pub searches_total: u64,
}

/// Helper for timing page fetches.
pub struct FetchTimer {
    start: Instant,
    metrics: Metrics,
}

impl FetchTimer {
    /// Start timing a page fetch.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_fetch(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_fetch(self.start.elapsed());
        self.metrics.record_fetch_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.pages_fetched_total(), 0);
        assert_eq!(metrics.fetch_errors_total(), 0);
        assert_eq!(metrics.searches_total(), 0);
    }

    #[test]
    fn test_average_fetch_duration() {
        let metrics = Metrics::new();
        metrics.record_fetch(Duration::from_millis(100));
        metrics.record_fetch(Duration::from_millis(200));
        assert_eq!(metrics.pages_fetched_total(), 2);
        assert_eq!(metrics.fetch_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_index_build_outcomes() {
        let metrics = Metrics::new();
        metrics.record_index_build(true);
        metrics.record_index_build(false);
        metrics.record_index_build(true);
        assert_eq!(metrics.index_builds_total(), 2);
        assert_eq!(metrics.index_build_errors_total(), 1);
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        metrics.record_documents_indexed(3);
        metrics.record_documents_removed(1);
        metrics.record_store_errors(2);
        metrics.record_search();

        let summary = metrics.summary();
        assert_eq!(summary.documents_indexed_total, 3);
        assert_eq!(summary.documents_removed_total, 1);
        assert_eq!(summary.store_errors_total, 2);
        assert_eq!(summary.searches_total, 1);
    }

    #[test]
    fn test_fetch_timer_with_error() {
        let metrics = Metrics::new();
        let timer = FetchTimer::new(metrics.clone());
        timer.complete_with_error();

        assert_eq!(metrics.pages_fetched_total(), 1);
        assert_eq!(metrics.fetch_errors_total(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let metrics1 = metrics.clone();
        let metrics2 = metrics.clone();

        let handle1 = thread::spawn(move || {
            for _ in 0..100 {
                metrics1.record_documents_indexed(1);
            }
        });

        let handle2 = thread::spawn(move || {
            for _ in 0..100 {
                metrics2.record_documents_indexed(1);
            }
        });

        handle1.join().unwrap();
        handle2.join().unwrap();

        assert_eq!(metrics.documents_indexed_total(), 200);
    }
}

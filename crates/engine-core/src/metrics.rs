use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    runs_started: AtomicU64,
    runs_rejected: AtomicU64,
    categories_processed: AtomicU64,
    documents_indexed: AtomicU64,
    updates_applied: AtomicU64,
    failure_count: AtomicU64,
    retry_count: AtomicU64,
}

/// Process-wide ingestion counters, cheap to clone and share.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub runs_started: u64,
    pub runs_rejected: u64,
    pub categories_processed: u64,
    pub documents_indexed: u64,
    pub updates_applied: u64,
    pub failure_count: u64,
    pub retry_count: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_runs(&self) {
        self.inner.runs_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejections(&self) {
        self.inner.runs_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_categories(&self, count: u64) {
        self.inner
            .categories_processed
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_indexed(&self, count: u64) {
        self.inner
            .documents_indexed
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_updates(&self, count: u64) {
        self.inner.updates_applied.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_failures(&self, count: u64) {
        self.inner.failure_count.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_retries(&self, count: u64) {
        self.inner.retry_count.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs_started: self.inner.runs_started.load(Ordering::Relaxed),
            runs_rejected: self.inner.runs_rejected.load(Ordering::Relaxed),
            categories_processed: self.inner.categories_processed.load(Ordering::Relaxed),
            documents_indexed: self.inner.documents_indexed.load(Ordering::Relaxed),
            updates_applied: self.inner.updates_applied.load(Ordering::Relaxed),
            failure_count: self.inner.failure_count.load(Ordering::Relaxed),
            retry_count: self.inner.retry_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

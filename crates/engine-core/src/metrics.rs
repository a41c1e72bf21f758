use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    rows_persisted: AtomicU64,
    rows_failed: AtomicU64,
    batches_flushed: AtomicU64,
    batch_failures: AtomicU64,
}

/// Cheaply clonable run-wide counters, shared by every batch processor of a run.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub rows_persisted: u64,
    pub rows_failed: u64,
    pub batches_flushed: u64,
    pub batch_failures: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_persisted(&self, count: u64) {
        self.inner
            .rows_persisted
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_failed(&self, count: u64) {
        self.inner.rows_failed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_batches(&self, count: u64) {
        self.inner
            .batches_flushed
            .fetch_add(count, Ordering::Relaxed);
    }

    /// A batch whose rows were not all persisted.
    pub fn increment_batch_failures(&self, count: u64) {
        self.inner.batch_failures.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_persisted: self.inner.rows_persisted.load(Ordering::Relaxed),
            rows_failed: self.inner.rows_failed.load(Ordering::Relaxed),
            batches_flushed: self.inner.batches_flushed.load(Ordering::Relaxed),
            batch_failures: self.inner.batch_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

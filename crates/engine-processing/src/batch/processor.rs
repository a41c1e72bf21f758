use crate::error::BatchError;
use async_trait::async_trait;
use engine_core::metrics::Metrics;
use model::stats::RowsProcessedStats;
use std::time::Instant;
use tracing::{debug, info};

/// Persists one batch of specifications and reports how it went.
///
/// Implementations never fail: storage errors are logged and converted into
/// all-failed stats, so the processor can treat every batch the same way.
#[async_trait]
pub trait BatchFn<S: Send + 'static>: Send + Sync {
    async fn process_batch(&self, specs: Vec<S>) -> RowsProcessedStats;
}

/// Accumulates specifications and flushes them through a [`BatchFn`] once
/// `batch_size` are pending.
///
/// `add` only returns after a triggered flush has completed, which bounds
/// memory to one batch and keeps the reader from racing ahead of the store.
pub struct BatchProcessor<S, F> {
    name: String,
    batch_size: usize,
    pending: Vec<S>,
    stats: RowsProcessedStats,
    flushes: u64,
    batch_fn: F,
    metrics: Metrics,
}

impl<S, F> BatchProcessor<S, F>
where
    S: Send + 'static,
    F: BatchFn<S>,
{
    pub fn new(name: impl Into<String>, batch_size: usize, batch_fn: F) -> Result<Self, BatchError> {
        if batch_size == 0 {
            return Err(BatchError::InvalidBatchSize);
        }

        Ok(Self {
            name: name.into(),
            batch_size,
            pending: Vec::with_capacity(batch_size),
            stats: RowsProcessedStats::default(),
            flushes: 0,
            batch_fn,
            metrics: Metrics::new(),
        })
    }

    /// Report into run-wide metrics instead of private ones.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub async fn add(&mut self, spec: S) {
        self.pending.push(spec);
        if self.pending.len() >= self.batch_size {
            self.flush().await;
        }
    }

    /// Drain the pending buffer, if any, through the batch function.
    pub async fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let batch = std::mem::replace(&mut self.pending, Vec::with_capacity(self.batch_size));
        let size = batch.len();
        let start = Instant::now();

        debug!(batch = %self.name, rows = size, "Flushing batch");
        let result = self.batch_fn.process_batch(batch).await;

        self.flushes += 1;
        self.stats += result;
        self.metrics.increment_batches(1);
        self.metrics.increment_persisted(result.rows_success);
        self.metrics.increment_failed(result.rows_failed);
        if result.rows_failed > 0 {
            self.metrics.increment_batch_failures(1);
        }

        info!(
            batch = %self.name,
            rows = size,
            success = result.rows_success,
            failed = result.rows_failed,
            duration_ms = start.elapsed().as_millis(),
            "Batch flushed"
        );
    }

    /// Totals over every flush so far. Rows still pending are not included.
    pub fn stats(&self) -> RowsProcessedStats {
        self.stats
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_test::traced_test;

    /// Records the size of every batch it receives and reports a fixed
    /// number of failures per batch.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingBatchFn {
        pub batches: Arc<Mutex<Vec<Vec<u32>>>>,
        pub fail_per_batch: u64,
    }

    #[async_trait]
    impl BatchFn<u32> for RecordingBatchFn {
        async fn process_batch(&self, specs: Vec<u32>) -> RowsProcessedStats {
            let n = specs.len() as u64;
            self.batches.lock().unwrap().push(specs);
            let failed = self.fail_per_batch.min(n);
            RowsProcessedStats::new(n, n - failed, failed)
        }
    }

    #[tokio::test]
    async fn threshold_triggers_exactly_one_flush() {
        let recorder = RecordingBatchFn::default();
        let mut processor = BatchProcessor::new("test", 3, recorder.clone()).unwrap();

        processor.add(1).await;
        processor.add(2).await;
        assert_eq!(processor.flush_count(), 0);

        processor.add(3).await;
        assert_eq!(processor.flush_count(), 1);
        assert_eq!(processor.pending(), 0);

        processor.add(4).await;
        assert_eq!(processor.flush_count(), 1);
        assert_eq!(processor.pending(), 1);
        assert_eq!(*recorder.batches.lock().unwrap(), vec![vec![1, 2, 3]]);
    }

    #[tokio::test]
    async fn flush_drains_remainder_and_is_noop_when_empty() {
        let recorder = RecordingBatchFn::default();
        let mut processor = BatchProcessor::new("test", 2, recorder.clone()).unwrap();

        for i in 0..5 {
            processor.add(i).await;
        }
        processor.flush().await;
        processor.flush().await;

        assert_eq!(processor.flush_count(), 3);
        assert_eq!(
            *recorder.batches.lock().unwrap(),
            vec![vec![0, 1], vec![2, 3], vec![4]]
        );
        assert_eq!(processor.stats(), RowsProcessedStats::all_succeeded(5));
    }

    #[traced_test]
    #[tokio::test]
    async fn stats_fold_batch_outcomes() {
        let recorder = RecordingBatchFn {
            fail_per_batch: 1,
            ..Default::default()
        };
        let metrics = Metrics::new();
        let mut processor = BatchProcessor::new("test", 2, recorder)
            .unwrap()
            .with_metrics(metrics.clone());

        for i in 0..4 {
            processor.add(i).await;
        }

        assert_eq!(processor.stats(), RowsProcessedStats::new(4, 2, 2));
        let snap = metrics.snapshot();
        assert_eq!(snap.batches_flushed, 2);
        assert_eq!(snap.batch_failures, 2);
        assert_eq!(snap.rows_persisted, 2);
        assert!(logs_contain("Batch flushed"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let result = BatchProcessor::<u32, _>::new("test", 0, RecordingBatchFn::default());
        assert!(matches!(result, Err(BatchError::InvalidBatchSize)));
    }
}

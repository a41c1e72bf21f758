use super::processor::{BatchFn, BatchProcessor};
use crate::transform::{HeadersValidator, RowTransform};
use async_trait::async_trait;
use engine_core::diagnostics::SharedDiagnostics;
use model::{records::row::CsvRow, stats::RowsProcessedStats};

/// Consumer side of the stream driver: sees the header line once, then
/// every data row, then the end of the stream.
#[async_trait]
pub trait RowProcessor: Send {
    fn name(&self) -> &str;

    fn validate_headers(&mut self, headers: &[String]) -> bool;

    async fn process_row(&mut self, row: CsvRow);

    /// Flush what is buffered and report the totals for the stream.
    async fn completed(&mut self) -> RowsProcessedStats;

    /// Data rows received so far.
    fn rows_seen(&self) -> u64;
}

/// [`RowProcessor`] that maps rows through a [`RowTransform`] and persists
/// the resulting specifications in batches.
pub struct BatchRowProcessor<T: RowTransform, F> {
    transform: T,
    validator: HeadersValidator,
    batch: BatchProcessor<T::Spec, F>,
    rows_seen: u64,
}

impl<T, F> BatchRowProcessor<T, F>
where
    T: RowTransform,
    F: BatchFn<T::Spec>,
{
    pub fn new(transform: T, batch: BatchProcessor<T::Spec, F>, diagnostics: SharedDiagnostics) -> Self {
        let validator = HeadersValidator::new(transform.name(), transform.required_headers(), diagnostics);
        Self {
            transform,
            validator,
            batch,
            rows_seen: 0,
        }
    }

    pub fn batch(&self) -> &BatchProcessor<T::Spec, F> {
        &self.batch
    }
}

#[async_trait]
impl<T, F> RowProcessor for BatchRowProcessor<T, F>
where
    T: RowTransform,
    F: BatchFn<T::Spec>,
{
    fn name(&self) -> &str {
        self.transform.name()
    }

    fn validate_headers(&mut self, headers: &[String]) -> bool {
        self.validator.validate(headers)
    }

    async fn process_row(&mut self, row: CsvRow) {
        self.rows_seen += 1;
        // Rejected rows were already reported by the transform.
        if let Some(spec) = self.transform.transform(&row) {
            self.batch.add(spec).await;
        }
    }

    async fn completed(&mut self) -> RowsProcessedStats {
        self.batch.flush().await;

        let rows_success = self.batch.stats().rows_success;
        RowsProcessedStats::new(
            self.rows_seen,
            rows_success,
            self.rows_seen.saturating_sub(rows_success),
        )
    }

    fn rows_seen(&self) -> u64 {
        self.rows_seen
    }
}

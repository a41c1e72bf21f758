use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Row counters reported by a batch, a file import, or a whole run.
///
/// Once a batch cycle has completed, `rows_processed == rows_success + rows_failed`.
/// Mid-batch the identity does not necessarily hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowsProcessedStats {
    pub rows_processed: u64,
    pub rows_success: u64,
    pub rows_failed: u64,
}

impl RowsProcessedStats {
    pub fn new(rows_processed: u64, rows_success: u64, rows_failed: u64) -> Self {
        Self {
            rows_processed,
            rows_success,
            rows_failed,
        }
    }

    /// Stats for a batch where nothing persisted.
    pub fn all_failed(rows: u64) -> Self {
        Self::new(rows, 0, rows)
    }

    /// Stats for a batch where every row persisted.
    pub fn all_succeeded(rows: u64) -> Self {
        Self::new(rows, rows, 0)
    }

    pub fn is_balanced(&self) -> bool {
        self.rows_processed == self.rows_success + self.rows_failed
    }

    pub fn is_clean(&self) -> bool {
        self.rows_failed == 0 && self.rows_success == self.rows_processed
    }
}

impl AddAssign for RowsProcessedStats {
    fn add_assign(&mut self, other: Self) {
        self.rows_processed += other.rows_processed;
        self.rows_success += other.rows_success;
        self.rows_failed += other.rows_failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assign_accumulates_every_counter() {
        let mut total = RowsProcessedStats::default();
        total += RowsProcessedStats::new(10, 8, 2);
        total += RowsProcessedStats::all_failed(3);
        assert_eq!(total, RowsProcessedStats::new(13, 8, 5));
        assert!(total.is_balanced());
        assert!(!total.is_clean());
    }

    #[test]
    fn all_succeeded_is_clean() {
        assert!(RowsProcessedStats::all_succeeded(4).is_clean());
        assert!(RowsProcessedStats::default().is_clean());
    }
}

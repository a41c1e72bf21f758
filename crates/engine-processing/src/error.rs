use connectors::{error::DownloadError, file::csv::FileError};
use engine_core::error::StoreError;
use model::stats::RowsProcessedStats;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,
}

/// Errors that abort the import of a whole file.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid headers for '{name}'; no rows were imported")]
    InvalidHeaders { name: String },

    #[error("Failed to open CSV source: {0}")]
    File(#[from] FileError),

    #[error("Failed to download CSV source: {0}")]
    Download(#[from] DownloadError),

    /// The CSV stream broke after some rows were processed. `stats` covers
    /// the rows handled before the fault.
    #[error("CSV stream failed after {} rows: {source}", stats.rows_processed)]
    Stream {
        #[source]
        source: FileError,
        stats: RowsProcessedStats,
    },

    #[error("Batch configuration error: {0}")]
    Batch(#[from] BatchError),

    #[error("Failed to set up storage for import: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to read entities from store: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to write CSV output: {0}")]
    File(#[from] FileError),
}

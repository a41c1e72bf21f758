//! Drives a CSV source through a [`RowProcessor`].
//!
//! One file is one sequential pipeline: rows are pulled only as fast as the
//! processor (and thereby the store) accepts them.

use crate::{batch::RowProcessor, error::ImportError};
use connectors::{
    file::csv::{CsvRowReader, open_file},
    http::Downloader,
};
use model::stats::RowsProcessedStats;
use std::{path::PathBuf, time::Instant};
use tokio::io::AsyncRead;
use tracing::{info, warn};

pub use connectors::source::CsvSource;

/// Import from any async byte stream.
pub async fn process_stream<R>(
    reader: R,
    processor: &mut dyn RowProcessor,
) -> Result<RowsProcessedStats, ImportError>
where
    R: AsyncRead + Unpin + Send,
{
    let csv = CsvRowReader::new(reader).await?;
    drive(csv, processor).await
}

/// Import a local CSV file.
pub async fn process_file(
    path: impl Into<PathBuf>,
    processor: &mut dyn RowProcessor,
) -> Result<RowsProcessedStats, ImportError> {
    let path = path.into();
    let csv = open_file(&path).await?;
    drive(csv, processor).await
}

/// Import a remote CSV file. The source must pass the ranged probe before
/// any row is read.
pub async fn process_download_stream(
    downloader: &Downloader,
    url: &str,
    processor: &mut dyn RowProcessor,
) -> Result<RowsProcessedStats, ImportError> {
    let body = downloader.open(url).await?;
    process_stream(body, processor).await
}

pub async fn process_source(
    source: &CsvSource,
    downloader: &Downloader,
    processor: &mut dyn RowProcessor,
) -> Result<RowsProcessedStats, ImportError> {
    match source {
        CsvSource::File(path) => process_file(path.clone(), processor).await,
        CsvSource::Url(url) => process_download_stream(downloader, url, processor).await,
    }
}

async fn drive<R>(
    mut csv: CsvRowReader<R>,
    processor: &mut dyn RowProcessor,
) -> Result<RowsProcessedStats, ImportError>
where
    R: AsyncRead + Unpin + Send,
{
    if !processor.validate_headers(csv.headers()) {
        return Err(ImportError::InvalidHeaders {
            name: processor.name().to_string(),
        });
    }

    let start = Instant::now();
    loop {
        match csv.next_row().await {
            Ok(Some(row)) => processor.process_row(row).await,
            Ok(None) => break,
            Err(source) => {
                let stats = processor.completed().await;
                warn!(
                    processor = processor.name(),
                    rows = stats.rows_processed,
                    "CSV stream broke; buffered rows were flushed"
                );
                return Err(ImportError::Stream { source, stats });
            }
        }
    }

    let stats = processor.completed().await;
    info!(
        processor = processor.name(),
        rows = stats.rows_processed,
        success = stats.rows_success,
        failed = stats.rows_failed,
        duration_ms = start.elapsed().as_millis(),
        "CSV stream processed"
    );
    Ok(stats)
}

use crate::file::csv::error::FileError;
use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord};
use model::records::row::CsvRow;
use std::{path::Path, sync::Arc};
use tokio::io::AsyncRead;

const UTF8_BOM: char = '\u{feff}';

fn normalize_header(header: &str) -> String {
    header.trim_start_matches(UTF8_BOM).trim().to_string()
}

/// Streaming CSV reader yielding [`CsvRow`]s addressable by header name.
///
/// The header row is read eagerly on construction; data rows are pulled one
/// at a time so the caller controls the pace of the underlying stream.
pub struct CsvRowReader<R> {
    inner: AsyncReader<R>,
    headers: Arc<[String]>,
    record: StringRecord,
}

impl<R> CsvRowReader<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub async fn new(reader: R) -> Result<Self, FileError> {
        let mut inner = AsyncReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .create_reader(reader);

        let headers: Arc<[String]> = inner.headers().await?.iter().map(normalize_header).collect();

        Ok(CsvRowReader {
            inner,
            headers,
            record: StringRecord::new(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Next data row, or `None` at end of stream.
    pub async fn next_row(&mut self) -> Result<Option<CsvRow>, FileError> {
        if !self.inner.read_record(&mut self.record).await? {
            return Ok(None);
        }

        let line = self.record.position().map(|p| p.line()).unwrap_or(0);
        let values = self.record.iter().map(str::to_string).collect();
        Ok(Some(CsvRow::new(self.headers.clone(), values, line)))
    }
}

/// Open a local CSV file for streaming.
pub async fn open_file(path: impl AsRef<Path>) -> Result<CsvRowReader<tokio::fs::File>, FileError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FileError::NotFound(path.display().to_string()),
        _ => FileError::IoError(e),
    })?;
    CsvRowReader::new(file).await
}

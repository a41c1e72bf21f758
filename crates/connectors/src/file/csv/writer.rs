use crate::file::csv::error::FileError;
use csv_async::{AsyncWriter, AsyncWriterBuilder};
use tokio::io::AsyncWrite;

/// Streaming CSV serializer. Fields are quoted only when necessary, so
/// multi-line cells survive a write/read cycle.
pub struct CsvRowWriter<W: AsyncWrite + Unpin> {
    inner: AsyncWriter<W>,
    rows_written: u64,
}

impl<W> CsvRowWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        CsvRowWriter {
            inner: AsyncWriterBuilder::new().create_writer(writer),
            rows_written: 0,
        }
    }

    pub async fn write_headers(&mut self, headers: &[&str]) -> Result<(), FileError> {
        self.inner.write_record(headers).await?;
        Ok(())
    }

    pub async fn write_row(&mut self, row: &[String]) -> Result<(), FileError> {
        self.inner.write_record(row).await?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush buffered output and return the number of data rows written.
    pub async fn finish(mut self) -> Result<u64, FileError> {
        self.inner.flush().await?;
        Ok(self.rows_written)
    }
}

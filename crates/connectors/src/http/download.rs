use crate::error::DownloadError;
use bytes::Bytes;
use futures_util::{StreamExt, TryStreamExt, stream::BoxStream};
use reqwest::{Client, StatusCode, header::RANGE};
use tokio_util::io::StreamReader;
use tracing::{debug, info};

/// Async reader over an HTTP response body.
pub type DownloadReader = StreamReader<BoxStream<'static, std::io::Result<Bytes>>, Bytes>;

/// Fetches remote CSV sources.
///
/// Before streaming, the source is probed with a one-byte ranged request; a
/// source that cannot answer with 206 Partial Content is rejected outright.
#[derive(Debug, Clone, Default)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Confirm `url` supports ranged (resumable) transfer.
    pub async fn probe(&self, url: &str) -> Result<(), DownloadError> {
        let response = self
            .client
            .get(url)
            .header(RANGE, "bytes=0-0")
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Probed download source");

        if status != StatusCode::PARTIAL_CONTENT {
            return Err(DownloadError::NotResumable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Probe `url`, then start the download and return its body as a reader.
    pub async fn open(&self, url: &str) -> Result<DownloadReader, DownloadError> {
        self.probe(url).await?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        info!(url, content_length = ?response.content_length(), "Streaming download");

        let body = response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed();
        Ok(StreamReader::new(body))
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The ranged probe did not answer with 206 Partial Content.
    #[error("Source '{url}' does not support resumable download (status {status})")]
    NotResumable { url: String, status: u16 },

    #[error("Unexpected status {status} while downloading '{url}'")]
    UnexpectedStatus { url: String, status: u16 },
}

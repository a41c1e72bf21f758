pub mod download;

pub use download::{DownloadReader, Downloader};

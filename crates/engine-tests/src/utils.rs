#![allow(dead_code)]

use connectors::source::CsvSource;
use engine_core::repository::Repository;
use futures::TryStreamExt;
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> CsvSource {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    CsvSource::File(path)
}

/// Collect everything `repository` holds for `model_id`.
pub async fn fetch_all<R: Repository>(repository: &R, model_id: &str) -> Vec<R::Entity> {
    repository
        .find_all(model_id)
        .try_collect::<Vec<_>>()
        .await
        .expect("read store")
}

/// Minimal HTTP/1.1 file server for download tests.
///
/// Serves `files` by path. When `ranged` is false, `Range` headers are
/// ignored and every request gets the full body with 200, like a server
/// without resume support.
pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(files: HashMap<String, String>, ranged: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let files = Arc::new(files);

        let handle = tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                let files = files.clone();
                tokio::spawn(async move {
                    let _ = serve(socket, &files, ranged).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut socket: TcpStream,
    files: &HashMap<String, String>,
    ranged: bool,
) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .trim_start_matches('/');
    let has_range = request
        .lines()
        .any(|line| line.to_ascii_lowercase().starts_with("range:"));

    let response = match files.get(path) {
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        Some(body) if has_range && ranged => {
            let first = &body.as_bytes()[..1.min(body.len())];
            format!(
                "HTTP/1.1 206 Partial Content\r\nContent-Range: bytes 0-0/{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                first.len(),
                String::from_utf8_lossy(first)
            )
        }
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    };

    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

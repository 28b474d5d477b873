//! Minimal HTTP server for exercising the imgflip clients offline
//!
//! Answers every request with the same JSON body and records the raw
//! requests it received.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Starts a server on an ephemeral local port answering `200 OK` with `body`
    pub async fn start(body: &str) -> Self {
        Self::start_with_status("200 OK", body).await
    }

    /// Like [`MockServer::start`], answering with `status` (e.g. `"400 Bad Request"`)
    pub async fn start_with_status(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let url = format!("http://{}", listener.local_addr().expect("No local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let status = status.to_string();
        let body = body.to_string();
        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let status = status.clone();
                let body = body.clone();
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    if let Ok(request) = read_request(&mut stream).await {
                        recorded.lock().unwrap().push(request);
                    }
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { url, requests }
    }

    /// Number of requests served so far
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Raw text of every request served so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// HTTP client that ignores proxy settings from the environment
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client")
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

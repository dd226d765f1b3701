//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use confluence_proxy::config::{Credentials, ProxyConfig};
use confluence_proxy::http::HttpServer;
use confluence_proxy::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_TOKEN: &str = "secret-token";
/// base64("test@example.com:secret-token")
pub const TEST_AUTHORIZATION: &str = "Basic dGVzdEBleGFtcGxlLmNvbTpzZWNyZXQtdG9rZW4=";

/// Request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    /// Header names lowercased.
    pub headers: HashMap<String, String>,
}

/// Canned answer of the mock upstream.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.into(),
        }
    }

    pub fn text(status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }
}

/// Log of requests received by a mock upstream.
pub type RequestLog = Arc<Mutex<Vec<MockRequest>>>;

/// Start a programmable mock upstream on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, RequestLog)
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let task_log = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let log = task_log.clone();
                    tokio::spawn(async move {
                        handle_connection(socket, f, log).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

async fn handle_connection<F, Fut>(mut socket: TcpStream, f: Arc<F>, log: RequestLog)
where
    F: Fn(MockRequest) -> Fut,
    Fut: Future<Output = MockResponse>,
{
    let Some(request) = read_request_head(&mut socket).await else {
        return;
    };
    log.lock().unwrap().push(request.clone());

    let response = f(request).await;
    let reason = StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.content_type,
        response.body.len(),
        response.body
    );
    let _ = socket.write_all(raw.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request_head(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    Some(MockRequest {
        method,
        target,
        headers,
    })
}

/// Address nothing is listening on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Proxy configuration pointed at `upstream` with test credentials.
pub fn proxy_config(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.credentials = Credentials::new(TEST_EMAIL, TEST_TOKEN);
    config.confluence.base_url = format!("http://{}", upstream);
    config.confluence.space_key = "DOCS".to_string();
    config.confluence.stylesheet_url = format!("http://{}/theme/site.css", upstream);
    config
}

/// Start the proxy on an ephemeral port. Drop or trigger the returned
/// `Shutdown` to stop it.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that neither pools connections nor follows redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

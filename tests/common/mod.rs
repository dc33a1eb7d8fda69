//! Common test utilities
//!
//! Shared fixtures and the harness that wires the real router to a mock
//! upstream.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use typhoon_proxy::{routes, AppState, Config};

use crate::mocks::MockOpenTyphoon;

/// Test configuration constants
pub mod constants {
    /// API key the proxy is configured with
    pub const TEST_API_KEY: &str = "test-opentyphoon-key";
    /// Path a browser client would post to
    pub const FUNCTION_PATH: &str = "/.netlify/functions/ai";
}

/// Sample request/response data for tests
pub mod test_data {
    use serde_json::{json, Value};

    pub fn valid_chat_request() -> Value {
        json!({
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "สวัสดี" }
            ]
        })
    }

    pub fn simple_response() -> Value {
        json!({ "choices": [{ "message": { "content": "hi" } }] })
    }
}

/// Harness with the real router in front of a mock OpenTyphoon
pub struct ProxyTestHarness {
    pub server: TestServer,
    pub upstream: MockOpenTyphoon,
}

impl ProxyTestHarness {
    /// Harness with a configured credential
    pub async fn new() -> Self {
        Self::with_api_key(Some(constants::TEST_API_KEY)).await
    }

    /// Harness with an optional credential
    pub async fn with_api_key(api_key: Option<&str>) -> Self {
        let upstream = MockOpenTyphoon::start().await;
        let config = Config::for_upstream(upstream.uri(), api_key.map(str::to_string));
        let server = server_for(config);

        Self { server, upstream }
    }
}

/// Build a test server around the real router for a given config
pub fn server_for(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    let app = routes::create_router(state);

    TestServer::new(app).expect("Failed to create test server")
}

/// Upstream that answers one request with `status` and a body shorter than its
/// declared `Content-Length`, then hangs up
///
/// Returns the base URL to configure the proxy with.
pub async fn spawn_truncated_upstream(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind truncated upstream");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        // read the whole request so the client is not cut off mid-send
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            request.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {} Upstream\r\nContent-Type: text/plain\r\nContent-Length: 1000\r\nConnection: close\r\n\r\ncut short",
            status
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

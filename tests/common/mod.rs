//! Mock MCP server shared by the integration tests.
//!
//! Runs an axum app on its own thread and tokio runtime so that the blocking
//! client under test can be driven from a plain `#[test]`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Path;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

/// One request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub tool: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct MockServer {
    pub base: String,
    pub requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockServer {
    /// Answer every `POST /mcp/tools/{tool}` with `status` and `body`.
    pub fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, None)
    }

    /// Like [`MockServer::start`], but wait `delay` before answering.
    pub fn start_with_delay(status: u16, body: &str, delay: Option<Duration>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();
        let reply = body.to_string();
        let status = StatusCode::from_u16(status).unwrap();

        let app = Router::new().route(
            "/mcp/tools/{tool}",
            post(
                move |Path(tool): Path<String>, headers: HeaderMap, body: String| {
                    let log = log.clone();
                    let reply = reply.clone();
                    async move {
                        log.lock().unwrap().push(CapturedRequest {
                            tool,
                            content_type: headers
                                .get(CONTENT_TYPE)
                                .and_then(|v| v.to_str().ok())
                                .map(String::from),
                            body,
                        });
                        if let Some(delay) = delay {
                            tokio::time::sleep(delay).await;
                        }
                        (status, reply)
                    }
                },
            ),
        );

        Self {
            base: spawn(app),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `app` on an ephemeral port and return its base URI.
fn spawn(app: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

/// A base URI on which nothing is listening.
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub const ONE_RECORD_BODY: &str =
    r#""[{\"name\":\"docs\",\"type\":\"milvus\",\"collection\":\"c1\",\"document_count\":42}]""#;

//! HTTP transport for MCP tool calls.
//!
//! A tool call is a single `POST {base}/mcp/tools/{tool}` carrying the
//! JSON-encoded parameter object. The transport does not look at the
//! response content: a 2xx body is handed back verbatim, anything else is
//! turned into an [`Error::Transport`] with a [`TransportCause`].
//!
//! There is exactly one attempt per call. Timeouts, connection failures and
//! non-2xx statuses are all surfaced to the caller immediately.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result, TransportCause};

/// Longest slice of an error response body kept in [`TransportCause::Status`].
const MAX_SNIPPET_CHARS: usize = 1024;

/// Something that can deliver a tool call and return the raw response body.
///
/// [`HttpTransport`] is the real implementation; tests substitute canned
/// responses.
pub trait Transport: Send + Sync {
    fn post(&self, tool: &str, params: &Value) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport built on `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    server_uri: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            server_uri: config.server_uri.clone(),
            timeout: config.timeout,
        }
    }

    pub fn server_uri(&self) -> &str {
        &self.server_uri
    }

    fn classify(&self, err: &reqwest::Error) -> TransportCause {
        if err.is_timeout() {
            TransportCause::Timeout {
                secs: self.timeout.as_secs_f64(),
            }
        } else {
            TransportCause::Connect {
                detail: error_chain(err),
            }
        }
    }
}

impl Transport for HttpTransport {
    fn post(&self, tool: &str, params: &Value) -> Result<Vec<u8>> {
        let fail = |cause: TransportCause| Error::Transport {
            tool: tool.to_string(),
            cause,
        };

        let url = tool_url(&self.server_uri, tool).map_err(fail)?;
        let body = serde_json::to_vec(params).map_err(|e| Error::Encoding {
            detail: format!("failed to marshal request: {}", e),
        })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                fail(TransportCause::Connect {
                    detail: error_chain(&e),
                })
            })?;

        debug!(%url, bytes = body.len(), "calling MCP tool");

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| fail(self.classify(&e)))?;

        let status = response.status();
        debug!(status = status.as_u16(), "MCP tool responded");

        if !status.is_success() {
            let text = response.text().unwrap_or_else(|e| {
                warn!(error = %e, "could not read error response body");
                String::new()
            });
            return Err(fail(TransportCause::Status {
                code: status.as_u16(),
                snippet: snippet(&text),
            }));
        }

        let bytes = response.bytes().map_err(|e| {
            if e.is_timeout() {
                fail(self.classify(&e))
            } else {
                fail(TransportCause::Body {
                    detail: error_chain(&e),
                })
            }
        })?;

        Ok(bytes.to_vec())
    }
}

/// Build `{base}/mcp/tools/{tool}`.
///
/// Segments are appended through the URL path API, so the tool name is
/// percent-encoded rather than spliced into the string. A trailing slash on
/// the base is tolerated and any path prefix on the base is kept.
pub fn tool_url(base: &str, tool: &str) -> std::result::Result<Url, TransportCause> {
    let invalid = |detail: String| TransportCause::InvalidUrl {
        uri: base.to_string(),
        detail,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported protocol scheme \"{}\"",
            url.scheme()
        )));
    }

    url.path_segments_mut()
        .map_err(|_| invalid("URI cannot be used as a base".to_string()))?
        .pop_if_empty()
        .extend(["mcp", "tools", tool]);

    Ok(url)
}

fn snippet(body: &str) -> String {
    match body.char_indices().nth(MAX_SNIPPET_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Render an error with all of its sources, e.g. "error sending request: connection refused".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = inner.source();
    }
    out
}

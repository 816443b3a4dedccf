//! Client for the Maestro Knowledge MCP server.
//!
//! [`McpClient`] hides the wire protocol behind typed operations. It holds
//! no session state: construct one per invocation with an explicit endpoint
//! (see [`ClientConfig`]) or share one between threads.
//!
//! ```rust,no_run
//! use maestro_k::client::McpClient;
//! use maestro_k::config::ClientConfig;
//!
//! let client = McpClient::new(&ClientConfig::new("http://localhost:8000"));
//! for db in client.list_databases()? {
//!     println!("{} ({}): {} documents", db.name, db.kind, db.document_count);
//! }
//! # Ok::<(), maestro_k::error::Error>(())
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::DatabaseInfo;
use crate::normalize::normalize;
use crate::transport::{HttpTransport, Transport};

/// Tool name of the database listing operation.
pub const LIST_DATABASES_TOOL: &str = "list_databases";

/// Typed front-end over a [`Transport`].
#[derive(Debug, Clone)]
pub struct McpClient<T = HttpTransport> {
    transport: T,
}

impl McpClient<HttpTransport> {
    /// Client talking HTTP to `config.server_uri`.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(HttpTransport::new(config))
    }
}

impl<T: Transport> McpClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke `tool` with `params` and return the raw response body.
    pub fn call_tool<P: Serialize + ?Sized>(&self, tool: &str, params: &P) -> Result<Vec<u8>> {
        let params = serde_json::to_value(params).map_err(|e| Error::Encoding {
            detail: format!("failed to marshal parameters for '{}': {}", tool, e),
        })?;
        self.transport.post(tool, &params)
    }

    /// List the vector databases known to the server, in server order.
    ///
    /// Transport failures come back as [`Error::Transport`], unintelligible
    /// payloads as [`Error::Parse`].
    pub fn list_databases(&self) -> Result<Vec<DatabaseInfo>> {
        let body = self.call_tool(LIST_DATABASES_TOOL, &Value::Object(Default::default()))?;
        normalize(LIST_DATABASES_TOOL, &body)
    }
}

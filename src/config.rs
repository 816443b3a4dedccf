//! Runtime configuration: server endpoint resolution and global run flags.
//!
//! The endpoint is resolved from, in priority order:
//!
//! 1. an explicit `--mcp-server-uri` value,
//! 2. the `MAESTRO_KNOWLEDGE_MCP_SERVER_URI` environment variable
//!    (which may itself come from a `.env` file loaded at startup),
//! 3. [`DEFAULT_SERVER_URI`].
//!
//! Empty values are treated as unset at every level.

use std::time::Duration;

/// Environment variable consulted when no explicit server URI is given.
pub const SERVER_URI_ENV: &str = "MAESTRO_KNOWLEDGE_MCP_SERVER_URI";

/// Fallback endpoint when nothing else is configured.
pub const DEFAULT_SERVER_URI: &str = "http://localhost:8000";

/// Request timeout for every tool call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one [`McpClient`](crate::client::McpClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_uri: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config for the given endpoint with the default timeout.
    pub fn new(server_uri: impl Into<String>) -> Self {
        Self {
            server_uri: server_uri.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve the endpoint from an explicit override and the environment.
    pub fn from_env(explicit: Option<&str>) -> Self {
        Self::new(resolve_server_uri(explicit))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub verbose: bool,
    pub silent: bool,
    pub dry_run: bool,
}

/// Resolve the server URI using the process environment.
pub fn resolve_server_uri(explicit: Option<&str>) -> String {
    let env_value = std::env::var(SERVER_URI_ENV).ok();
    pick_server_uri(explicit, env_value.as_deref())
}

/// Pure resolution: explicit > environment > default.
pub fn pick_server_uri(explicit: Option<&str>, env_value: Option<&str>) -> String {
    explicit
        .filter(|s| !s.is_empty())
        .or(env_value.filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_SERVER_URI)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins_over_env() {
        let uri = pick_server_uri(Some("http://explicit:1"), Some("http://env:2"));
        assert_eq!(uri, "http://explicit:1");
    }

    #[test]
    fn test_env_used_without_explicit() {
        let uri = pick_server_uri(None, Some("http://env:2"));
        assert_eq!(uri, "http://env:2");
    }

    #[test]
    fn test_default_when_nothing_set() {
        assert_eq!(pick_server_uri(None, None), DEFAULT_SERVER_URI);
    }

    #[test]
    fn test_empty_values_are_unset() {
        assert_eq!(pick_server_uri(Some(""), Some("")), DEFAULT_SERVER_URI);
        assert_eq!(pick_server_uri(Some(""), Some("http://env:2")), "http://env:2");
    }

    #[test]
    fn test_client_config_defaults_to_thirty_seconds() {
        let cfg = ClientConfig::new("http://localhost:8000");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        let cfg = cfg.with_timeout(Duration::from_millis(250));
        assert_eq!(cfg.timeout, Duration::from_millis(250));
    }
}

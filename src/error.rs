//! Error taxonomy shared by the RPC client and the validation pipeline.
//!
//! Every failure the core can produce maps to one [`Error`] variant. The
//! variants are deliberately coarse so that the command layer can tell
//! "could not reach the server" ([`Error::Transport`]) apart from "the
//! server answered with something unintelligible" ([`Error::Parse`]) and
//! from local input problems ([`Error::NotFound`], [`Error::Syntax`],
//! [`Error::SchemaViolation`]).
//!
//! Nothing in this crate retries. A failure is reported once and the
//! invocation stops.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Finding;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the transport, normalizer, client, and validation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be encoded as JSON. This is a local bug, not a
    /// remote failure.
    #[error("encoding error: {detail}")]
    Encoding { detail: String },

    /// The request for a tool call never produced a usable 2xx response.
    #[error("transport error calling tool '{tool}': {cause}")]
    Transport { tool: String, cause: TransportCause },

    /// The server answered 2xx but the payload was neither the sentinel nor
    /// a JSON array of records.
    #[error("failed to parse response from tool '{tool}': {reason} (raw: {raw})")]
    Parse {
        tool: String,
        raw: String,
        reason: String,
    },

    /// An input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// An input file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document is not well-formed.
    #[error("invalid YAML format in {}: {detail}", path.display())]
    Syntax { path: PathBuf, detail: String },

    /// The schema file is not JSON, or is not a usable JSON Schema.
    #[error("invalid schema {}: {detail}", path.display())]
    InvalidSchema { path: PathBuf, detail: String },

    /// The document parsed but breaks one or more schema constraints.
    #[error("validation failed with {count} errors")]
    SchemaViolation { count: usize, findings: Vec<Finding> },
}

/// Why a transport call failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportCause {
    /// No response within the configured request timeout.
    #[error("request timed out after {secs:.1}s")]
    Timeout { secs: f64 },

    /// The server answered with a non-2xx status.
    #[error("HTTP error {code}: {snippet}")]
    Status { code: u16, snippet: String },

    /// Connection refused, DNS failure, TLS failure and the like.
    #[error("failed to make HTTP request: {detail}")]
    Connect { detail: String },

    /// The endpoint base could not be turned into a tool URL.
    #[error("invalid server URI '{uri}': {detail}")]
    InvalidUrl { uri: String, detail: String },

    /// A 2xx response arrived but its body could not be read.
    #[error("failed to read response body: {detail}")]
    Body { detail: String },
}

impl Error {
    /// HTTP status code captured from a non-2xx response, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Transport {
                cause: TransportCause::Status { code, .. },
                ..
            } => Some(*code),
            _ => None,
        }
    }

    /// True when the request was abandoned because of the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Transport {
                cause: TransportCause::Timeout { .. },
                ..
            }
        )
    }

    /// Findings carried by a [`Error::SchemaViolation`]; empty otherwise.
    pub fn findings(&self) -> &[Finding] {
        match self {
            Error::SchemaViolation { findings, .. } => findings,
            _ => &[],
        }
    }
}

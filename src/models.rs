//! Core data models returned by the RPC client and the validation pipeline.

use serde::{Deserialize, Serialize};

/// One vector database as reported by the `list_databases` tool.
///
/// Field names on the wire follow the server: `type` and `document_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub collection: String,
    pub document_count: u64,
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Dotted path of the offending value, `(root)` for the document itself.
    pub field: String,
    pub description: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.description)
    }
}

//! # maestro-k
//!
//! Command-line client for the Maestro Knowledge MCP server, plus YAML
//! validation against JSON Schema.
//!
//! The server exposes named *tools* at `POST /mcp/tools/{tool}`. This crate
//! turns a typed, synchronous call into that HTTP request, tolerates the
//! server's loose response encoding, and reports every failure through a
//! single [`error::Error`] type.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌────────────┐
//! │   CLI    │──▶│ McpClient │──▶│ Transport │──▶│ MCP server │
//! │ (list)   │   │           │◀──│  (HTTP)   │◀──│            │
//! └──────────┘   └─────┬─────┘   └───────────┘   └────────────┘
//!                      ▼
//!                ┌───────────┐
//!                │ normalize │
//!                └───────────┘
//!
//! ┌──────────┐   ┌──────────────────────────────────────────┐
//! │   CLI    │──▶│ validate: exists → YAML → JSON → schema  │
//! │(validate)│   └──────────────────────────────────────────┘
//! └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Endpoint resolution and run flags |
//! | [`error`] | Error taxonomy |
//! | [`models`] | Database records and validation findings |
//! | [`transport`] | HTTP POST to a tool URL |
//! | [`normalize`] | Decoding of `list_databases` responses |
//! | [`client`] | Typed MCP client |
//! | [`list`] | `list` command |
//! | [`validate`] | Validation pipeline and `validate` command |

pub mod client;
pub mod config;
pub mod error;
pub mod list;
pub mod models;
pub mod normalize;
pub mod transport;
pub mod validate;

//! `maestro-k list vector-database`: list the vector databases the MCP
//! server currently manages.

use anyhow::{bail, Context, Result};

use crate::client::McpClient;
use crate::config::{ClientConfig, RunFlags};
use crate::models::DatabaseInfo;

/// Accepted spellings of the only listable resource.
pub const RESOURCE_TYPES: [&str; 2] = ["vector-database", "vector-db"];

/// CLI entry point for `maestro-k list <resource>`.
pub fn run_list(flags: RunFlags, resource_type: &str, server_uri: Option<&str>) -> Result<()> {
    if !RESOURCE_TYPES.contains(&resource_type) {
        bail!(
            "unsupported resource type: {}. Use 'vector-database' or 'vector-db'",
            resource_type
        );
    }

    list_vector_databases(flags, server_uri)
}

fn list_vector_databases(flags: RunFlags, server_uri: Option<&str>) -> Result<()> {
    if flags.verbose {
        println!("Listing vector databases...");
    }

    if flags.dry_run {
        println!("[DRY RUN] Would list vector databases");
        return Ok(());
    }

    let config = ClientConfig::from_env(server_uri);
    if flags.verbose {
        println!("Connecting to MCP server at: {}", config.server_uri);
    }

    let client = McpClient::new(&config);
    let databases = client
        .list_databases()
        .context("failed to list vector databases")?;

    if !flags.silent {
        print!("{}", render_databases(&databases));
    }

    if flags.verbose {
        println!("Vector database listing completed successfully");
    }

    Ok(())
}

/// Human-readable listing, one numbered block per database.
pub fn render_databases(databases: &[DatabaseInfo]) -> String {
    if databases.is_empty() {
        return "No vector databases found\n".to_string();
    }

    let mut out = format!("Found {} vector database(s):\n\n", databases.len());
    for (i, db) in databases.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({})\n   Collection: {}\n   Documents: {}\n\n",
            i + 1,
            db.name,
            db.kind,
            db.collection,
            db.document_count
        ));
    }
    out
}

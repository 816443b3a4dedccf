//! # maestro-k CLI
//!
//! Talks to a Maestro Knowledge MCP server and validates YAML configuration
//! files.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `maestro-k list vector-db` | List vector databases on the MCP server |
//! | `maestro-k validate YAML_FILE` | Check YAML syntax |
//! | `maestro-k validate SCHEMA_FILE YAML_FILE` | Validate YAML against a JSON Schema |
//!
//! ## Examples
//!
//! ```bash
//! maestro-k list vector-db --mcp-server-uri=http://localhost:8000
//! maestro-k validate schema.json config.yaml --verbose
//! ```
//!
//! A `.env` file in the working directory is loaded at startup, so
//! `MAESTRO_KNOWLEDGE_MCP_SERVER_URI` can be set there.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use maestro_k::config::RunFlags;
use maestro_k::{list, validate};

/// Env var that overrides the log filter (e.g. `MAESTRO_K_LOG=debug`).
const LOG_ENV: &str = "MAESTRO_K_LOG";

/// maestro-k: CLI for the Maestro Knowledge MCP server.
#[derive(Parser)]
#[command(name = "maestro-k", version, about)]
struct Cli {
    /// Print progress information.
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress result output.
    #[arg(long, global = true)]
    silent: bool,

    /// Show what would be done without contacting the server or reading files.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List vector database resources.
    #[command(
        override_usage = "maestro-k list (vector-database | vector-db) [OPTIONS]",
        after_help = "Examples:\n  \
            maestro-k list vector-db\n  \
            maestro-k list vector-database --verbose\n  \
            maestro-k list vector-db --mcp-server-uri=http://localhost:8000"
    )]
    List {
        /// Resource type: `vector-database` or `vector-db`.
        resource_type: String,

        /// MCP server URI. Falls back to MAESTRO_KNOWLEDGE_MCP_SERVER_URI, then http://localhost:8000.
        #[arg(long)]
        mcp_server_uri: Option<String>,
    },

    /// Validate YAML files against schemas.
    ///
    /// With one argument only the YAML syntax is checked. With two, the first
    /// is a JSON Schema and the second the YAML document to validate.
    #[command(
        override_usage = "maestro-k validate [SCHEMA_FILE] YAML_FILE [OPTIONS]",
        after_help = "Examples:\n  \
            maestro-k validate config.yaml\n  \
            maestro-k validate schema.json config.yaml"
    )]
    Validate {
        /// `[SCHEMA_FILE] YAML_FILE`
        #[arg(required = true, num_args = 1..=2, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let flags = RunFlags {
        verbose: cli.verbose,
        silent: cli.silent,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::List {
            resource_type,
            mcp_server_uri,
        } => {
            list::run_list(flags, &resource_type, mcp_server_uri.as_deref())?;
        }
        Commands::Validate { files } => {
            let (schema, yaml) = split_validate_args(&files)?;
            validate::run_validate(flags, yaml, schema)?;
        }
    }

    Ok(())
}

/// `[YAML]` or `[SCHEMA, YAML]` → `(schema, yaml)`.
fn split_validate_args(files: &[PathBuf]) -> anyhow::Result<(Option<&Path>, &Path)> {
    match files {
        [yaml] => Ok((None, yaml.as_path())),
        [schema, yaml] => Ok((Some(schema.as_path()), yaml.as_path())),
        _ => anyhow::bail!("expected YAML_FILE or SCHEMA_FILE YAML_FILE"),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "maestro_k=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

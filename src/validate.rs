//! YAML validation, optionally against a JSON Schema.
//!
//! The pipeline is linear:
//!
//! 1. both input paths must exist (the YAML file is checked first);
//! 2. the YAML stream is parsed into document trees (every document must
//!    parse; the first one is the one that gets validated);
//! 3. without a schema, a successful parse is the whole check;
//! 4. otherwise the tree is converted structurally to JSON,
//! 5. evaluated against the schema loaded from its absolute path (which
//!    also serves as the base for relative `$ref`s),
//! 6. and every violation is collected into a [`Finding`].
//!
//! Used by the `maestro-k validate` command via [`run_validate`].

use std::fs;
use std::path::Path;

use anyhow::Context;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::config::RunFlags;
use crate::error::{Error, Result};
use crate::models::Finding;

/// How much checking a validation run performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// No schema was supplied; only YAML syntax was checked.
    SyntaxOnly,
    /// The document was evaluated against a JSON Schema.
    Schema,
}

/// Outcome of a validation run that got as far as evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub mode: ValidationMode,
    /// Violations in the order the schema evaluator reported them.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// `Ok(())` when valid, [`Error::SchemaViolation`] carrying every finding otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.findings.is_empty() {
            Ok(())
        } else {
            Err(Error::SchemaViolation {
                count: self.findings.len(),
                findings: self.findings,
            })
        }
    }
}

/// Validate `yaml_path`, against `schema_path` when given.
pub fn validate(yaml_path: &Path, schema_path: Option<&Path>) -> Result<()> {
    validate_detailed(yaml_path, schema_path)?.into_result()
}

/// Like [`validate`], but schema violations are returned in the report
/// instead of as an error.
pub fn validate_detailed(yaml_path: &Path, schema_path: Option<&Path>) -> Result<ValidationReport> {
    ensure_exists(yaml_path)?;
    if let Some(schema) = schema_path {
        ensure_exists(schema)?;
    }

    let raw = read_file(yaml_path)?;
    let documents = parse_documents(yaml_path, &raw)?;

    let Some(schema_path) = schema_path else {
        debug!(path = %yaml_path.display(), "no schema provided, YAML syntax is valid");
        return Ok(ValidationReport {
            mode: ValidationMode::SyntaxOnly,
            findings: Vec::new(),
        });
    };

    // Only the first document of a multi-document stream is evaluated.
    let document = documents.into_iter().next().unwrap_or(serde_yaml::Value::Null);
    let instance = yaml_to_json(&document)?;
    let schema_path = std::path::absolute(schema_path).map_err(|e| Error::Io {
        path: schema_path.to_path_buf(),
        source: e,
    })?;
    let validator = load_schema(&schema_path)?;

    let findings: Vec<Finding> = validator
        .iter_errors(&instance)
        .map(|err| Finding {
            field: field_path(&err.instance_path.to_string()),
            description: err.to_string(),
        })
        .collect();

    debug!(
        schema = %schema_path.display(),
        findings = findings.len(),
        "schema evaluation finished"
    );

    Ok(ValidationReport {
        mode: ValidationMode::Schema,
        findings,
    })
}

/// Structural YAML → JSON conversion.
///
/// Aliases are already resolved by the YAML parser. Mapping keys that have
/// no JSON string form (sequences, mappings) are rejected.
pub fn yaml_to_json(document: &serde_yaml::Value) -> Result<serde_json::Value> {
    serde_json::to_value(document).map_err(|e| Error::Encoding {
        detail: format!("failed to convert YAML to JSON: {}", e),
    })
}

/// Parse every document in a YAML stream, so a syntax error in any of them is reported.
fn parse_documents(path: &Path, raw: &[u8]) -> Result<Vec<serde_yaml::Value>> {
    serde_yaml::Deserializer::from_slice(raw)
        .map(|doc| {
            serde_yaml::Value::deserialize(doc).map_err(|e| Error::Syntax {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })
        })
        .collect()
}

fn ensure_exists(path: &Path) -> Result<()> {
    match path.try_exists() {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_schema(path: &Path) -> Result<jsonschema::Validator> {
    let invalid = |detail: String| Error::InvalidSchema {
        path: path.to_path_buf(),
        detail,
    };

    let text = read_file(path)?;
    let mut schema: serde_json::Value =
        serde_json::from_slice(&text).map_err(|e| invalid(format!("not valid JSON: {}", e)))?;

    // Relative `$ref`s resolve against the schema file's own location.
    if let Some(object) = schema.as_object_mut() {
        if !object.contains_key("$id") {
            let base = Url::from_file_path(path)
                .map_err(|_| invalid("schema path cannot be expressed as a file URI".to_string()))?;
            object.insert("$id".to_string(), serde_json::Value::String(base.into()));
        }
    }

    jsonschema::validator_for(&schema).map_err(|e| invalid(e.to_string()))
}

/// Render a JSON pointer the way findings are reported: `a.0.b`, or `(root)`.
fn field_path(pointer: &str) -> String {
    if pointer.is_empty() || pointer == "/" {
        return "(root)".to_string();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|seg| seg.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

// ============ CLI ============

/// CLI entry point for `maestro-k validate [SCHEMA_FILE] YAML_FILE`.
pub fn run_validate(flags: RunFlags, yaml_path: &Path, schema_path: Option<&Path>) -> anyhow::Result<()> {
    if flags.verbose {
        println!("Validating YAML file: {}", yaml_path.display());
        match schema_path {
            Some(schema) => println!("Using schema file: {}", schema.display()),
            None => println!("No schema provided, only validating YAML syntax"),
        }
    }

    if flags.dry_run {
        println!("[DRY RUN] Would validate files");
        return Ok(());
    }

    let report = validate_detailed(yaml_path, schema_path).context("validation failed")?;

    if !report.is_valid() && !flags.silent {
        eprintln!("Validation failed:");
        for finding in &report.findings {
            eprintln!("- {}", finding);
        }
    }
    let mode = report.mode;
    report.into_result().context("validation failed")?;

    if flags.verbose && mode == ValidationMode::Schema {
        println!("Schema validation passed");
    }
    if !flags.silent {
        println!("Validation successful");
    }

    Ok(())
}

//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use pactum_core::{Schema, SchemaDeclaration};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load a schema declaration and build its schema
///
/// `validation.deny_unknown_fields` from the config tightens every declaration.
pub fn load_schema(path: &Path, config: &Config) -> Result<Schema> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        return Err(Error::invalid_args(format!(
            "{} is a directory, expected a declaration file",
            path.display()
        )));
    }

    let mut declaration = SchemaDeclaration::from_path(path)?;
    if config.validation.deny_unknown_fields {
        declaration.deny_unknown_fields = true;
    }
    debug!(
        schema = %declaration.name,
        fields = declaration.fields.len(),
        "Loaded declaration"
    );

    Ok(declaration.to_schema()?)
}

/// Load a JSON or YAML document; `-` reads JSON from stdin
pub fn load_data(path: &Path) -> Result<Value> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return parse_data(path, &content, false);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    parse_data(path, &content, is_yaml)
}

fn parse_data(path: &Path, content: &str, is_yaml: bool) -> Result<Value> {
    if is_yaml {
        serde_yaml::from_str(content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            message: e.to_string(),
        })
    } else {
        serde_json::from_str(content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            message: e.to_string(),
        })
    }
}

/// Seeded RNG when a seed is known, entropy-seeded otherwise
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

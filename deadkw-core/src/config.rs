//! Configuration loading from deadkw.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{DeadkwError, DeadkwResult};

/// Name of the optional config file looked up in the scanned directory.
pub const CONFIG_FILE: &str = "deadkw.toml";

/// Main configuration structure for deadkw.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DeadkwConfig {
    /// File name suffixes to scan.
    pub file_types: Option<Vec<String>>,
    /// Directory names to skip during traversal.
    pub exclude: Option<Vec<String>>,
    /// Ignore indented `#` lines when looking for usages.
    pub skip_commented_usages: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> DeadkwResult<Self> {
        match s {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(DeadkwError::invalid_argument(format!(
                "unknown output format '{}' (expected 'plain' or 'json')",
                other
            ))),
        }
    }
}

impl DeadkwConfig {
    /// Output format requested by the config, if any.
    pub fn output_format(&self) -> DeadkwResult<Option<OutputFormat>> {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .map(OutputFormat::parse)
            .transpose()
    }
}

/// Loads configuration from deadkw.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<DeadkwConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg = toml::from_str::<DeadkwConfig>(&content)
        .map_err(|e| DeadkwError::config(&path, e.to_string()))
        .context("Invalid deadkw.toml")?;
    Ok(Some(cfg))
}

//! Configuration file support for vulnscope.
//!
//! Provides YAML-based configuration through `vulnscope.config.yml` files,
//! including data structures, file loading, and validation. Values given on
//! the command line always take precedence over the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use vulnscope::application::dto::OutputFormat;
use vulnscope::scan_report::domain::Severity;
use vulnscope::scan_report::policies::{SchemaVersion, SortStrategy};
use vulnscope::shared::error::ReportError;
use vulnscope::shared::Result;

pub const CONFIG_FILENAME: &str = "vulnscope.config.yml";

/// Schema version assumed for the consuming database client when none is configured
pub const DEFAULT_DB_SCHEMA_VERSION: &str = "6.0.3";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub sort_by: Option<String>,
    pub db_schema_version: Option<String>,
    pub fail_on: Option<String>,
    pub tool_name: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Typed view of a validated config file
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportConfig {
    pub format: Option<OutputFormat>,
    pub sort_by: Option<SortStrategy>,
    pub db_schema_version: Option<SchemaVersion>,
    pub fail_on: Option<Severity>,
    pub tool_name: Option<String>,
}

impl ConfigFile {
    /// Parses every value into its typed form
    ///
    /// # Errors
    /// Returns `ReportError::Validation` naming the first invalid field
    pub fn resolve(&self) -> Result<ReportConfig> {
        fn parse_field<T, E>(field: &str, value: Option<&String>) -> Result<Option<T>>
        where
            T: std::str::FromStr<Err = E>,
            E: std::fmt::Display,
        {
            value
                .map(|raw| {
                    raw.parse::<T>().map_err(|e| {
                        anyhow::Error::from(ReportError::Validation {
                            message: format!(
                                "Invalid config: {}: {}\n\n💡 Hint: Fix or remove '{}' in {}",
                                field, e, field, CONFIG_FILENAME
                            ),
                        })
                    })
                })
                .transpose()
        }

        Ok(ReportConfig {
            format: parse_field("format", self.format.as_ref())?,
            sort_by: parse_field("sort_by", self.sort_by.as_ref())?,
            db_schema_version: parse_field("db_schema_version", self.db_schema_version.as_ref())?,
            fail_on: parse_field("fail_on", self.fail_on.as_ref())?,
            tool_name: self.tool_name.clone(),
        })
    }
}

/// Effective settings of a report run, embedded into the report descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub scan: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,
    pub format: String,
    pub sort_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    config.resolve()?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<(PathBuf, ConfigFile)>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some((config_path, config)))
}

/// Loads the explicit config if given, otherwise auto-discovers one in the working directory
pub fn load_config(explicit: Option<&Path>) -> Result<Option<(PathBuf, ConfigFile)>> {
    match explicit {
        Some(path) => Ok(Some((path.to_path_buf(), load_config_from_path(path)?))),
        None => {
            let cwd = std::env::current_dir().context("Failed to determine working directory")?;
            discover_config(&cwd)
        }
    }
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

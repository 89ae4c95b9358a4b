//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Link target of schema references when no template is configured
pub const DEFAULT_SCHEMA_LINK_TEMPLATE: &str = "/schemas/{name}/";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenAPI document to read when `--api` is not given (path or URL)
    pub api_path: Option<String>,

    /// Link target for schema references in markup; `{name}` is replaced
    pub schema_link_template: String,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,

    /// Remote document settings
    pub fetch: FetchConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Settings for documents loaded over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_path: None,
            schema_link_template: DEFAULT_SCHEMA_LINK_TEMPLATE.to_string(),
            output: OutputConfig::default(),
            logging: LoggingSettings::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Configuration file formats, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str_with_format(&content, ConfigFormat::from_path(path))?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to load config, trying next location");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for name in [".apiref", "apiref"] {
            for extension in ["yaml", "json", "toml"] {
                paths.push(PathBuf::from(format!("{}.{}", name, extension)));
            }
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let apiref_dir = config_dir.join("apiref");
            for extension in ["yaml", "json", "toml"] {
                paths.push(apiref_dir.join(format!("config.{}", extension)));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for extension in ["yaml", "json", "toml"] {
                paths.push(home_dir.join(format!(".apiref.{}", extension)));
            }
        }

        paths
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if !self.schema_link_template.contains("{name}") {
            return Err(Error::config(format!(
                "schema_link_template '{}' must contain {{name}}",
                self.schema_link_template
            )));
        }
        if crate::cli::OutputFormat::from_name(&self.output.format).is_none() {
            return Err(Error::config(format!(
                "unknown output.format '{}', expected human, json, json-pretty or yaml",
                self.output.format
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(Error::config("fetch.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

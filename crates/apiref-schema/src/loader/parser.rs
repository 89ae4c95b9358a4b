//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Parser producing a JSON value tree from either format
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, &path.display().to_string())
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, origin: &str) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, origin),
            Format::Json => self.parse_json(content, origin),
        }
    }

    /// Parse content of unknown format: JSON first, YAML otherwise
    pub fn parse_auto(&self, content: &str, origin: &str) -> LoaderResult<Value> {
        match self.parse_json(content, origin) {
            Ok(value) => Ok(value),
            Err(_) => self.parse_yaml(content, origin),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, origin: &str) -> LoaderResult<Value> {
        // Go through serde_yaml's own value first so YAML errors keep their location
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(origin, e))?;

        serde_json::to_value(yaml_value).map_err(|e| LoaderError::json_parse_error(origin, e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, origin: &str) -> LoaderResult<Value> {
        serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(origin, e))
    }

    /// Check that the value looks like an OpenAPI 3 document
    pub fn validate_root(&self, value: &Value, origin: &str) -> LoaderResult<()> {
        let root = value.as_object().ok_or_else(|| {
            LoaderError::invalid_document(origin, "document must be an object at the root level")
        })?;

        // an unquoted `openapi: 3.1` comes out of YAML as a number
        let version = match root.get("openapi") {
            Some(Value::String(version)) => Some(version.clone()),
            Some(Value::Number(version)) => Some(version.to_string()),
            _ => None,
        };

        match version {
            Some(version) if version.starts_with("3.") => Ok(()),
            Some(version) => Err(LoaderError::invalid_document(
                origin,
                format!("unsupported OpenAPI version '{}'", version),
            )),
            None => Err(LoaderError::invalid_document(origin, "missing 'openapi' version field")),
        }
    }
}

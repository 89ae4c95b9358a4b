//! Error types for document loading operations
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while turning an OpenAPI document into a schema graph
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML document '{origin}': {source}")]
    YamlParseError {
        origin: String,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON document '{origin}': {source}")]
    JsonParseError {
        origin: String,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Reference resolution errors
    #[error("Failed to resolve reference '{reference}' at '{pointer}': {reason}")]
    ReferenceError {
        reference: String,
        pointer: String,
        reason: String,
    },

    /// Reference chain that never reaches a definition
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// A `type` keyword outside the supported set
    #[error("Unsupported schema type '{type_name}' at '{pointer}'")]
    UnsupportedType { pointer: String, type_name: String },

    /// Structurally invalid document or schema
    #[error("Invalid document '{origin}': {reason}")]
    InvalidDocument { origin: String, reason: String },

    /// Graph construction errors
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error
    pub fn yaml_parse_error(origin: impl Into<String>, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            origin: origin.into(),
            source: error,
        }
    }

    /// Create a JSON parsing error
    pub fn json_parse_error(origin: impl Into<String>, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            origin: origin.into(),
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a reference resolution error
    pub fn reference_error(
        reference: impl Into<String>,
        pointer: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ReferenceError {
            reference: reference.into(),
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }

    /// Create a circular reference error from the chain of references followed
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type(pointer: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            pointer: pointer.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Location inside the document the error points at, if any
    pub fn pointer(&self) -> Option<&str> {
        match self {
            Self::ReferenceError { pointer, .. } => Some(pointer),
            Self::UnsupportedType { pointer, .. } => Some(pointer),
            _ => None,
        }
    }

    /// Document (file path or `<inline>`) the error was raised for, if known
    pub fn origin(&self) -> Option<String> {
        match self {
            Self::IoError { path, .. } | Self::UnsupportedFormat { path } => {
                Some(path.display().to_string())
            }
            Self::YamlParseError { origin, .. }
            | Self::JsonParseError { origin, .. }
            | Self::InvalidDocument { origin, .. } => Some(origin.clone()),
            _ => None,
        }
    }

    /// Whether the error comes from reading or parsing the raw document
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::IoError { .. }
                | Self::YamlParseError { .. }
                | Self::JsonParseError { .. }
                | Self::UnsupportedFormat { .. }
        )
    }
}

//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use apiref_schema::{LoaderError, SchemaError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The API document could not be loaded
    #[error("{0}")]
    Loader(#[from] LoaderError),

    /// Example synthesis or graph lookup failed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API document given on the command line, environment or config
    #[error("No API document given. Pass --api, set APIREF_API or set api_path in the config file")]
    NoApiDocument,

    /// Component schema not found
    #[error("Schema '{}' not found in the API document", name)]
    SchemaNotFound { name: String },

    /// Operation not found
    #[error("Operation '{}' not found in the API document", id)]
    OperationNotFound { id: String },

    /// Fetching a remote document failed
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Loader(_) => 2,
            Self::Schema(_) => 3,
            Self::FileNotFound { .. } => 4,
            Self::Config(_) => 5,
            Self::NoApiDocument => 6,
            Self::SchemaNotFound { .. } => 7,
            Self::OperationNotFound { .. } => 8,
            Self::Fetch { .. } => 10,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::NoApiDocument)
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Io(io::Error::new(io::ErrorKind::Other, "boom")),
            Error::Loader(LoaderError::invalid_document("api.yaml", "bad")),
            Error::Schema(SchemaError::invalid_primitive("object")),
            Error::FileNotFound { path: PathBuf::from("x") },
            Error::config("bad"),
            Error::NoApiDocument,
            Error::SchemaNotFound { name: "Pet".into() },
            Error::OperationNotFound { id: "listPets".into() },
            Error::fetch("https://example.com", "timeout"),
            Error::other("other"),
        ];

        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_format_error() {
        let error = Error::SchemaNotFound { name: "Pet".into() };
        assert_eq!(
            format_error(&error, false),
            "Error: Schema 'Pet' not found in the API document"
        );
        assert!(Error::NoApiDocument.should_show_help());
        assert!(!error.should_show_help());
    }

    #[test]
    fn test_format_loader_error() {
        let error = Error::Loader(LoaderError::unsupported_type("#/components/schemas/Upload", "file"));
        assert_eq!(
            format_error(&error, false),
            "Error: Unsupported schema type 'file' at '#/components/schemas/Upload'"
        );

        let error = Error::Loader(LoaderError::invalid_document("api.yaml", "bad root"));
        assert_eq!(format_error(&error, false), "Error: Invalid document 'api.yaml': bad root");
    }
}

//! OpenAPI document loading
//!
//! Turns a YAML or JSON OpenAPI 3 document into an [`ApiDocument`]: the
//! schema graph of its component and inline schemas plus an index of its
//! operations.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use apiref_schema::loader::DocumentLoader;
//! use std::path::Path;
//!
//! let loader = DocumentLoader::new();
//! let document = loader.load_file(Path::new("openapi.yaml"))?;
//! if let Some(pet) = document.schema("Pet") {
//!     println!("{}", document.render_type(pet)?);
//!     println!("{}", serde_json::to_string_pretty(&document.example_of(pet)?)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod document;
pub mod error;
pub mod parser;

pub use builder::{GraphBuilder, COMPONENT_SCHEMA_PREFIX};
pub use document::{ApiDocument, HttpMethod, Operation, Parameter, RequestBody, Response};
pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Configuration for document loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Whether to reject documents that do not declare OpenAPI 3
    pub validate_version: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            validate_version: true,
        }
    }
}

/// Loads OpenAPI documents from files or in-memory content
#[derive(Debug, Default)]
pub struct DocumentLoader {
    config: LoaderConfig,
    parser: DocumentParser,
}

impl DocumentLoader {
    /// Create a loader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: DocumentParser::new(),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a document file, detecting the format from its extension
    pub fn load_file(&self, path: &Path) -> LoaderResult<ApiDocument> {
        debug!(path = %path.display(), "Loading API document");
        let root = self.parser.parse_file(path)?;
        self.index(&root, &path.display().to_string())
    }

    /// Load document content of a known format
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<ApiDocument> {
        let root = self.parser.parse_content(content, format, "<inline>")?;
        self.index(&root, "<inline>")
    }

    /// Load document content of unknown format
    pub fn load_str_auto(&self, content: &str) -> LoaderResult<ApiDocument> {
        let root = self.parser.parse_auto(content, "<inline>")?;
        self.index(&root, "<inline>")
    }

    /// Index an already parsed document
    pub fn load_value(&self, root: &Value) -> LoaderResult<ApiDocument> {
        self.index(root, "<value>")
    }

    fn index(&self, root: &Value, origin: &str) -> LoaderResult<ApiDocument> {
        if self.config.validate_version {
            self.parser.validate_root(root, origin)?;
        } else if !root.is_object() {
            return Err(LoaderError::invalid_document(
                origin,
                "document must be an object at the root level",
            ));
        }

        let document = ApiDocument::from_value(root)?;
        info!(
            origin,
            schemas = document.schemas.len(),
            operations = document.operations.len(),
            "Loaded API document"
        );
        Ok(document)
    }
}

//! Error types for schema graph operations
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::graph::SchemaId;
use thiserror::Error;

/// Result type for schema graph operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building or walking a schema graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A node reached the primitive resolver without a scalar kind
    #[error("Invalid primitive schema type: {kind}")]
    InvalidPrimitiveSchema { kind: String },

    /// A node refers to a handle the graph never handed out
    #[error("Schema {parent} refers to unknown schema {child}")]
    DanglingReference { parent: SchemaId, child: SchemaId },

    /// A handle does not belong to the graph
    #[error("Unknown schema {id}")]
    UnknownSchema { id: SchemaId },
}

impl SchemaError {
    /// Create an invalid primitive error for the given kind name
    pub fn invalid_primitive(kind: impl Into<String>) -> Self {
        Self::InvalidPrimitiveSchema { kind: kind.into() }
    }

    /// Create a dangling reference error
    pub fn dangling_reference(parent: SchemaId, child: SchemaId) -> Self {
        Self::DanglingReference { parent, child }
    }

    /// Create an unknown schema error
    pub fn unknown_schema(id: SchemaId) -> Self {
        Self::UnknownSchema { id }
    }
}

//! apiref schema engine - examples and type descriptions for OpenAPI schemas
//!
//! This crate turns the schemas of an OpenAPI 3 document into the two pieces
//! an API reference page shows for every payload:
//! - **Example values**: one representative JSON value per schema
//! - **Type descriptions**: a short phrase such as `array (Pet)` or
//!   `one of: [Cat, Dog]`, with named schemas kept as references
//!
//! ## Features
//!
//! - **Cyclic schemas**: self- and mutually-referential schemas are walked
//!   without recursing forever
//! - **Composition**: `allOf` properties are merged, `oneOf` alternatives are
//!   chosen or listed
//! - **Document loading**: YAML and JSON documents, local `$ref`s, an index of
//!   operations, parameters, request bodies and responses
//!
//! ## Quick Start
//!
//! ```rust
//! use apiref_schema::{example_of, render_type, SchemaGraph, SchemaNode};
//! use serde_json::json;
//!
//! let mut graph = SchemaGraph::new();
//! let name = graph.insert(SchemaNode::string()).unwrap();
//! let pet = graph
//!     .insert(SchemaNode::object().named("Pet").with_property("name", name))
//!     .unwrap();
//! let pets = graph.insert(SchemaNode::array(Some(pet))).unwrap();
//!
//! assert_eq!(example_of(&graph, pets).unwrap(), json!([{"name": "string"}]));
//! assert_eq!(render_type(&graph, pets).unwrap().to_string(), "array (Pet)");
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod composition;
pub mod error;
pub mod example;
pub mod graph;
pub mod loader;
pub mod primitive;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{SchemaError, SchemaResult};
pub use example::{example_of, ExampleSynthesizer, ADDITIONAL_PROPERTIES_KEY};
pub use graph::{AdditionalProperties, SchemaGraph, SchemaId, SchemaKind, SchemaNode};
pub use loader::{ApiDocument, DocumentLoader, Format, LoaderError, LoaderResult};
pub use render::{render_definition, render_type, DisplayToken, TypeRenderer};

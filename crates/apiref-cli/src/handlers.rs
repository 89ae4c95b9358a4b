//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

pub mod completions;
pub mod endpoint;
pub mod endpoints;
pub mod example;
pub mod schemas;
pub mod types;

pub use completions::handle_completions;
pub use endpoint::handle_endpoint;
pub use endpoints::handle_endpoints;
pub use example::handle_example;
pub use schemas::handle_schemas;
pub use types::handle_type;

use crate::error::{Error, Result};
use apiref_schema::{ApiDocument, SchemaId};

/// Handle of the component schema called `name`
pub(crate) fn lookup_schema(document: &ApiDocument, name: &str) -> Result<SchemaId> {
    document.schema(name).ok_or_else(|| Error::SchemaNotFound {
        name: name.to_string(),
    })
}

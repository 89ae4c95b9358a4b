//! Schemas command handler

use crate::cli::SchemasArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use apiref_schema::{ApiDocument, DisplayToken};
use serde::Serialize;
use tracing::{debug, instrument};

/// One row of the schema listing
#[derive(Debug, Serialize)]
pub struct SchemaSummary {
    pub name: String,
    /// Plain-text rendering of `token`
    #[serde(rename = "type")]
    pub type_text: String,
    pub token: DisplayToken,
}

/// Handle the schemas command
#[instrument(skip_all, fields(filter = ?args.filter))]
pub fn handle_schemas(
    args: SchemasArgs,
    document: &ApiDocument,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("schemas_command");
    let summaries = summarize(document, args.filter.as_deref())?;
    debug!(listed = summaries.len(), total = document.schemas.len(), "Listing schemas");

    if !output.is_human() {
        return output.data(&summaries);
    }

    if summaries.is_empty() {
        return match args.filter {
            Some(filter) => output.info(&format!("No schema name contains '{}'", filter)),
            None => output.info("The document declares no component schemas"),
        };
    }

    let rows = summaries
        .into_iter()
        .map(|summary| vec![summary.name, summary.type_text])
        .collect();
    output.table(&["Schema", "Type"], rows)
}

/// Component schemas in document order, optionally filtered by name
pub fn summarize(document: &ApiDocument, filter: Option<&str>) -> Result<Vec<SchemaSummary>> {
    let filter = filter.map(str::to_lowercase);
    document
        .schemas
        .iter()
        .filter(|(name, _)| match &filter {
            Some(filter) => name.to_lowercase().contains(filter.as_str()),
            None => true,
        })
        .map(|(name, id)| -> Result<SchemaSummary> {
            let token = document.render_definition(*id)?;
            Ok(SchemaSummary {
                name: name.clone(),
                type_text: token.to_string(),
                token,
            })
        })
        .collect()
}

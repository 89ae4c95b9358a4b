//! Example command handler

use crate::cli::ExampleArgs;
use crate::error::Result;
use crate::handlers::lookup_schema;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use apiref_schema::ApiDocument;
use tracing::instrument;

/// Handle the example command
#[instrument(skip_all, fields(schema = %args.schema))]
pub fn handle_example(
    args: ExampleArgs,
    document: &ApiDocument,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("example_command", &args.schema);
    let schema = lookup_schema(document, &args.schema)?;
    let example = document.example_of(schema)?;
    output.example(&example)
}

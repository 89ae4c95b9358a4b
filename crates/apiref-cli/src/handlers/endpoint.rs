//! Endpoint command handler

use crate::cli::EndpointArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use apiref_schema::loader::Operation;
use apiref_schema::{ApiDocument, SchemaId};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

/// Everything shown for one operation
#[derive(Debug, Serialize)]
pub struct EndpointDetail {
    pub id: String,
    pub method: String,
    pub path: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Vec<ParameterView>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<BodyView>,
    pub responses: Vec<ResponseView>,
}

#[derive(Debug, Serialize)]
pub struct ParameterView {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub type_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BodyView {
    pub required: bool,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ResponseView {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Handle the endpoint command
#[instrument(skip_all, fields(operation = %args.operation_id))]
pub fn handle_endpoint(
    args: EndpointArgs,
    document: &ApiDocument,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("endpoint_command", &args.operation_id);
    let operation = document
        .operation(&args.operation_id)
        .ok_or_else(|| Error::OperationNotFound {
            id: args.operation_id.clone(),
        })?;
    let detail = describe(document, operation, !args.no_examples)?;

    if !output.is_human() {
        return output.data(&detail);
    }
    write_human(&detail, output)
}

/// Collect types (and examples when asked) for one operation
pub fn describe(document: &ApiDocument, operation: &Operation, examples: bool) -> Result<EndpointDetail> {
    let example_of = |schema: Option<SchemaId>| -> Result<Option<Value>> {
        match schema {
            Some(schema) if examples => Ok(Some(document.example_of(schema)?)),
            _ => Ok(None),
        }
    };
    let type_of = |schema: Option<SchemaId>| -> Result<Option<String>> {
        match schema {
            Some(schema) => Ok(Some(document.render_type(schema)?.to_string())),
            None => Ok(None),
        }
    };

    let parameters = operation
        .parameters
        .iter()
        .map(|parameter| -> Result<ParameterView> {
            Ok(ParameterView {
                name: parameter.name.clone(),
                location: parameter.location.clone(),
                required: parameter.required,
                type_text: type_of(parameter.schema)?.unwrap_or_else(|| "any".to_string()),
                description: parameter.description.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let request_body = match &operation.request_body {
        Some(body) => Some(BodyView {
            required: body.required,
            media_type: body.media_type.clone(),
            type_text: type_of(body.schema)?,
            description: body.description.clone(),
            example: example_of(body.schema)?,
        }),
        None => None,
    };

    let responses = operation
        .responses
        .iter()
        .map(|response| {
            Ok(ResponseView {
                status: response.status.clone(),
                description: response.description.clone(),
                media_type: response.media_type.clone(),
                type_text: type_of(response.schema)?,
                example: example_of(response.schema)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EndpointDetail {
        id: operation.id.clone(),
        method: operation.method.to_string(),
        path: operation.path.clone(),
        url: document.api_url(&operation.path),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        parameters,
        request_body,
        responses,
    })
}

fn write_human(detail: &EndpointDetail, output: &mut OutputWriter) -> Result<()> {
    output.writeln(&format!("{} {}", detail.method, detail.url))?;
    output.field("Operation", &detail.id)?;
    if let Some(summary) = &detail.summary {
        output.field("Summary", summary)?;
    }
    if let Some(description) = &detail.description {
        output.field("Description", description)?;
    }

    if !detail.parameters.is_empty() {
        output.section("Parameters")?;
        let rows = detail
            .parameters
            .iter()
            .map(|parameter| {
                vec![
                    parameter.name.clone(),
                    parameter.location.clone(),
                    if parameter.required { "yes" } else { "no" }.to_string(),
                    parameter.type_text.clone(),
                    parameter.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        output.table(&["Name", "In", "Required", "Type", "Description"], rows)?;
    }

    if let Some(body) = &detail.request_body {
        output.section("Request body")?;
        if let Some(media_type) = &body.media_type {
            output.field("Media type", media_type)?;
        }
        output.field("Required", if body.required { "yes" } else { "no" })?;
        if let Some(type_text) = &body.type_text {
            output.field("Type", type_text)?;
        }
        if let Some(description) = &body.description {
            output.field("Description", description)?;
        }
        if let Some(example) = &body.example {
            output.field("Example", "")?;
            output.writeln(&output.format().format_example(example)?)?;
        }
    }

    for response in &detail.responses {
        output.section(&format!("Response {}", response.status))?;
        if let Some(description) = &response.description {
            output.field("Description", description)?;
        }
        if let Some(media_type) = &response.media_type {
            output.field("Media type", media_type)?;
        }
        if let Some(type_text) = &response.type_text {
            output.field("Type", type_text)?;
        }
        if let Some(example) = &response.example {
            output.field("Example", "")?;
            output.writeln(&output.format().format_example(example)?)?;
        }
    }

    Ok(())
}

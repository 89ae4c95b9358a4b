//! Index of the parts of an OpenAPI document a reference site is built from
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::example::example_of;
use crate::graph::{SchemaGraph, SchemaId};
use crate::loader::builder::{escape_segment, GraphBuilder};
use crate::loader::error::{LoaderError, LoaderResult};
use crate::render::{render_definition, render_type, DisplayToken};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Media type preferred when an operation offers several
pub const PREFERRED_MEDIA_TYPE: &str = "application/json";

/// Operations listed for each path, in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Key of the operation inside a path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// An operation parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// `query`, `path`, `header` or `cookie`
    pub location: String,
    pub required: bool,
    pub description: Option<String>,
    pub schema: Option<SchemaId>,
}

/// Request body of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub media_type: Option<String>,
    pub schema: Option<SchemaId>,
}

/// One documented response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code or `default`
    pub status: String,
    pub description: Option<String>,
    pub media_type: Option<String>,
    pub schema: Option<SchemaId>,
}

/// One endpoint of the API
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// `operationId`, or an identifier derived from method and path
    pub id: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Vec<Response>,
}

/// A loaded OpenAPI document
#[derive(Debug, Clone)]
pub struct ApiDocument {
    pub title: Option<String>,
    pub version: Option<String>,
    /// URL of the first server, empty when none is declared
    pub base_url: String,
    pub operations: Vec<Operation>,
    /// Component schemas by name, in document order
    pub schemas: IndexMap<String, SchemaId>,
    pub graph: SchemaGraph,
}

impl ApiDocument {
    /// Index a parsed document
    pub fn from_value(root: &Value) -> LoaderResult<Self> {
        let mut builder = GraphBuilder::new(root)?;

        let info = root.get("info");
        let title = string_field(info, "title");
        let version = string_field(info, "version");
        let base_url = root
            .get("servers")
            .and_then(Value::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut operations = Vec::new();
        if let Some(paths) = root.get("paths") {
            let paths = paths.as_object().ok_or_else(|| {
                LoaderError::invalid_document("#/paths", "paths must be an object")
            })?;
            for (path, item) in paths {
                let pointer = format!("#/paths/{}", escape_segment(path));
                let item = builder.dereference(item, &pointer)?;
                collect_operations(&mut builder, path, item, &pointer, &mut operations)?;
            }
        }

        let (graph, schemas) = builder.finish();
        debug!(
            operations = operations.len(),
            schemas = schemas.len(),
            nodes = graph.len(),
            "Indexed API document"
        );

        Ok(Self {
            title,
            version,
            base_url,
            operations,
            schemas,
            graph,
        })
    }

    /// Absolute URL of an API path
    pub fn api_url(&self, path: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        format!("{}{}", base, path)
    }

    /// Handle of a component schema
    pub fn schema(&self, name: &str) -> Option<SchemaId> {
        self.schemas.get(name).copied()
    }

    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|operation| operation.id == id)
    }

    /// Synthesized example of a schema of this document
    pub fn example_of(&self, schema: SchemaId) -> SchemaResult<Value> {
        example_of(&self.graph, schema)
    }

    /// Type description of a schema of this document
    pub fn render_type(&self, schema: SchemaId) -> SchemaResult<DisplayToken> {
        render_type(&self.graph, schema)
    }

    /// Definition of a schema of this document, expanded even when named
    pub fn render_definition(&self, schema: SchemaId) -> SchemaResult<DisplayToken> {
        render_definition(&self.graph, schema)
    }
}

fn collect_operations<'d>(
    builder: &mut GraphBuilder<'d>,
    path: &str,
    item: &'d Value,
    pointer: &str,
    operations: &mut Vec<Operation>,
) -> LoaderResult<()> {
    let shared = item.get("parameters");

    for method in HttpMethod::ALL {
        let Some(operation) = item.get(method.as_str()) else {
            continue;
        };
        let operation_pointer = format!("{}/{}", pointer, method.as_str());

        let mut parameters = build_parameters(builder, shared, pointer)?;
        for parameter in build_parameters(builder, operation.get("parameters"), &operation_pointer)? {
            // operation-level parameters replace path-level ones with the same name and location
            parameters.retain(|p| p.name != parameter.name || p.location != parameter.location);
            parameters.push(parameter);
        }

        let request_body = match operation.get("requestBody") {
            Some(body) => Some(build_request_body(
                builder,
                body,
                &format!("{}/requestBody", operation_pointer),
            )?),
            None => None,
        };

        let responses = build_responses(builder, operation.get("responses"), &operation_pointer)?;

        let id = operation
            .get("operationId")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| derived_operation_id(method, path));

        operations.push(Operation {
            id,
            method,
            path: path.to_string(),
            summary: string_field(Some(operation), "summary"),
            description: string_field(Some(operation), "description"),
            parameters,
            request_body,
            responses,
        });
    }

    Ok(())
}

fn build_parameters<'d>(
    builder: &mut GraphBuilder<'d>,
    parameters: Option<&'d Value>,
    pointer: &str,
) -> LoaderResult<Vec<Parameter>> {
    let Some(parameters) = parameters else {
        return Ok(Vec::new());
    };
    let parameters = parameters.as_array().ok_or_else(|| {
        LoaderError::invalid_document(pointer, "parameters must be an array")
    })?;

    let mut built = Vec::with_capacity(parameters.len());
    for (index, parameter) in parameters.iter().enumerate() {
        let pointer = format!("{}/parameters/{}", pointer, index);
        let parameter = builder.dereference(parameter, &pointer)?;

        let name = string_field(Some(parameter), "name").ok_or_else(|| {
            LoaderError::invalid_document(pointer.as_str(), "parameter without a name")
        })?;
        let location = string_field(Some(parameter), "in").unwrap_or_else(|| "query".to_string());
        let schema = match parameter.get("schema") {
            Some(schema) => Some(builder.build_schema(schema, &format!("{}/schema", pointer))?),
            None => None,
        };

        built.push(Parameter {
            name,
            // path parameters are always required
            required: location == "path" || bool_field(parameter, "required"),
            location,
            description: string_field(Some(parameter), "description"),
            schema,
        });
    }

    Ok(built)
}

fn build_request_body<'d>(
    builder: &mut GraphBuilder<'d>,
    body: &'d Value,
    pointer: &str,
) -> LoaderResult<RequestBody> {
    let body = builder.dereference(body, pointer)?;
    let (media_type, schema) = build_content(builder, body, pointer)?;

    Ok(RequestBody {
        description: string_field(Some(body), "description"),
        required: bool_field(body, "required"),
        media_type,
        schema,
    })
}

fn build_responses<'d>(
    builder: &mut GraphBuilder<'d>,
    responses: Option<&'d Value>,
    pointer: &str,
) -> LoaderResult<Vec<Response>> {
    let Some(responses) = responses else {
        return Ok(Vec::new());
    };
    let responses: &'d Map<String, Value> = responses.as_object().ok_or_else(|| {
        LoaderError::invalid_document(pointer, "responses must be an object")
    })?;

    let mut built = Vec::with_capacity(responses.len());
    for (status, response) in responses {
        let pointer = format!("{}/responses/{}", pointer, escape_segment(status));
        let response = builder.dereference(response, &pointer)?;
        let (media_type, schema) = build_content(builder, response, &pointer)?;

        built.push(Response {
            status: status.clone(),
            description: string_field(Some(response), "description"),
            media_type,
            schema,
        });
    }

    Ok(built)
}

/// Media type and schema of a `content` map, JSON preferred
fn build_content(
    builder: &mut GraphBuilder<'_>,
    holder: &Value,
    pointer: &str,
) -> LoaderResult<(Option<String>, Option<SchemaId>)> {
    let Some(content) = holder.get("content").and_then(Value::as_object) else {
        return Ok((None, None));
    };

    let chosen = match content.get(PREFERRED_MEDIA_TYPE) {
        Some(media) => Some((PREFERRED_MEDIA_TYPE, media)),
        None => content.iter().next().map(|(key, media)| (key.as_str(), media)),
    };
    let Some((media_type, media)) = chosen else {
        return Ok((None, None));
    };

    let schema = match media.get("schema") {
        Some(schema) => {
            let pointer = format!("{}/content/{}/schema", pointer, escape_segment(media_type));
            Some(builder.build_schema(schema, &pointer)?)
        }
        None => None,
    };

    Ok((Some(media_type.to_string()), schema))
}

fn derived_operation_id(method: HttpMethod, path: &str) -> String {
    let slug: String = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.trim_matches(|c| c == '{' || c == '}'))
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        method.as_str().to_string()
    } else {
        format!("{}-{}", method.as_str(), slug)
    }
}

fn string_field(value: Option<&Value>, key: &str) -> Option<String> {
    value
        .and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .map(String::from)
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

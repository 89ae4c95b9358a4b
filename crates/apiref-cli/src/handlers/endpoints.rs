//! Endpoints command handler

use crate::cli::EndpointsArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use apiref_schema::loader::HttpMethod;
use apiref_schema::ApiDocument;
use serde::Serialize;
use tracing::{debug, instrument};

/// One row of the operation listing
#[derive(Debug, Serialize)]
pub struct EndpointSummary {
    pub id: String,
    pub method: String,
    pub path: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Handle the endpoints command
#[instrument(skip_all, fields(method = ?args.method))]
pub fn handle_endpoints(
    args: EndpointsArgs,
    document: &ApiDocument,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("endpoints_command");
    let endpoints = summarize(document, args.method.map(HttpMethod::from));
    debug!(listed = endpoints.len(), total = document.operations.len(), "Listing operations");

    if !output.is_human() {
        return output.data(&endpoints);
    }

    if endpoints.is_empty() {
        return output.info("No operations to list");
    }

    let rows = endpoints
        .into_iter()
        .map(|endpoint| {
            vec![
                endpoint.method,
                endpoint.url,
                endpoint.id,
                endpoint.summary.unwrap_or_default(),
            ]
        })
        .collect();
    output.table(&["Method", "URL", "Operation", "Summary"], rows)
}

/// Operations in document order, optionally restricted to one method
pub fn summarize(document: &ApiDocument, method: Option<HttpMethod>) -> Vec<EndpointSummary> {
    document
        .operations
        .iter()
        .filter(|operation| method.map_or(true, |method| operation.method == method))
        .map(|operation| EndpointSummary {
            id: operation.id.clone(),
            method: operation.method.to_string(),
            path: operation.path.clone(),
            url: document.api_url(&operation.path),
            summary: operation.summary.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Method, OutputFormat};
    use crate::handlers::fixtures::petstore;
    use crate::output::test_support::writer;

    #[test]
    fn test_summaries() {
        let document = petstore();
        let endpoints = summarize(&document, None);
        let listed: Vec<(&str, &str, &str)> = endpoints
            .iter()
            .map(|e| (e.method.as_str(), e.url.as_str(), e.id.as_str()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("GET", "https://petstore.example.com/v1/pets", "listPets"),
                ("POST", "https://petstore.example.com/v1/pets", "createPet"),
                (
                    "DELETE",
                    "https://petstore.example.com/v1/pets/{petId}",
                    "delete-pets-petId"
                ),
            ]
        );
    }

    #[test]
    fn test_method_filter() {
        let document = petstore();
        let (mut output, buffer) = writer(OutputFormat::Json);
        handle_endpoints(EndpointsArgs { method: Some(Method::Post) }, &document, &mut output)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": "createPet",
                "method": "POST",
                "path": "/pets",
                "url": "https://petstore.example.com/v1/pets",
                "summary": "Create a pet"
            }])
        );
    }

    #[test]
    fn test_human_table_and_empty_listing() {
        let document = petstore();
        let (mut output, buffer) = writer(OutputFormat::Human);
        handle_endpoints(EndpointsArgs { method: None }, &document, &mut output).unwrap();
        let contents = buffer.contents();
        assert!(contents.starts_with("Method │ URL"));
        assert!(contents.contains("listPets"));
        assert!(contents.contains("List all pets"));

        let (mut output, buffer) = writer(OutputFormat::Human);
        handle_endpoints(EndpointsArgs { method: Some(Method::Patch) }, &document, &mut output)
            .unwrap();
        assert_eq!(buffer.contents(), "INFO: No operations to list\n");
    }
}

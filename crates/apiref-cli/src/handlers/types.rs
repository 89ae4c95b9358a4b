//! Type command handler

use crate::cli::TypeArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::lookup_schema;
use crate::logging::timing::Timer;
use crate::markup::{render_markup, SchemaLinks, NAME_PLACEHOLDER};
use crate::output::{OutputFormatter, OutputWriter};
use apiref_schema::composition::merged_properties;
use apiref_schema::{ApiDocument, DisplayToken};
use serde::Serialize;
use tracing::{debug, instrument};

/// Type description of a component schema and of its properties
#[derive(Debug, Serialize)]
pub struct TypeView {
    pub schema: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub token: DisplayToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    pub properties: Vec<PropertyView>,
    /// Set when `anyOf` or `not` parts are missing from the description
    #[serde(rename = "unsupportedComposition", skip_serializing_if = "std::ops::Not::not")]
    pub unsupported_composition: bool,
}

#[derive(Debug, Serialize)]
pub struct PropertyView {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub token: DisplayToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

/// Handle the type command
#[instrument(skip_all, fields(schema = %args.schema, markup = args.markup))]
pub fn handle_type(
    args: TypeArgs,
    document: &ApiDocument,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("type_command", &args.schema);

    let links = if args.markup {
        let template = args
            .link_template
            .as_deref()
            .unwrap_or(&config.schema_link_template);
        if !template.contains(NAME_PLACEHOLDER) {
            return Err(Error::config(format!(
                "link template '{}' must contain {}",
                template, NAME_PLACEHOLDER
            )));
        }
        debug!(template, "Rendering markup");
        Some(SchemaLinks::new(template))
    } else {
        None
    };

    let view = describe(document, &args.schema, links.as_ref())?;

    if !output.is_human() {
        return output.data(&view);
    }

    if view.unsupported_composition {
        output.warning(&format!(
            "{} uses anyOf or not, which are left out of the description",
            args.schema
        ))?;
    }

    if let Some(markup) = &view.markup {
        output.writeln(markup)?;
    } else {
        let shown = output.format().format_type(&view.token)?;
        output.field("Schema", &view.schema)?;
        output.field("Type", &shown)?;
    }

    if view.properties.is_empty() {
        return Ok(());
    }

    output.section("Properties")?;
    let rows = view
        .properties
        .into_iter()
        .map(|property| {
            let shown = property.markup.unwrap_or(property.type_text);
            vec![property.name, shown]
        })
        .collect();
    output.table(&["Property", "Type"], rows)
}

/// Describe `name`, with HTML renderings when `links` is given
pub fn describe(document: &ApiDocument, name: &str, links: Option<&SchemaLinks>) -> Result<TypeView> {
    let schema = lookup_schema(document, name)?;
    let node = document.graph.node(schema)?;

    let properties = merged_properties(&document.graph, node)
        .into_iter()
        .map(|(property, id)| -> Result<PropertyView> {
            let token = document.render_type(id)?;
            Ok(PropertyView {
                name: property,
                type_text: token.to_string(),
                markup: links.map(|links| render_markup(&token, links)),
                token,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let token = document.render_definition(schema)?;
    Ok(TypeView {
        schema: name.to_string(),
        type_text: token.to_string(),
        markup: links.map(|links| render_markup(&token, links)),
        token,
        properties,
        unsupported_composition: node.unsupported_composition,
    })
}

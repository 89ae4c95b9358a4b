//! Human-readable type descriptions
//!
//! [`render_type`] describes the shape of a schema as a [`DisplayToken`] tree.
//! Named schemas are never inlined: they become [`DisplayToken::Reference`]
//! tokens carrying the schema name, and the caller decides what a reference
//! links to.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::graph::{AdditionalProperties, SchemaGraph, SchemaId, SchemaKind, SchemaNode};
use crate::primitive::primitive_display;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Container label for arrays
pub const ARRAY_CONTAINER: &str = "array";
/// Container label for objects typed only by `additionalProperties`
pub const DICTIONARY_CONTAINER: &str = "dictionary";

/// One unit of a rendered type description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayToken {
    /// Plain text such as `string` or `object`
    Text { value: String },
    /// A named schema
    Reference {
        #[serde(rename = "schemaName")]
        schema_name: String,
    },
    /// `array (...)` or `dictionary (...)` around the element type
    Container {
        container: String,
        element: Box<DisplayToken>,
    },
    /// The alternatives of a `oneOf`, in declaration order
    List { items: Vec<DisplayToken> },
}

impl DisplayToken {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn reference(schema_name: impl Into<String>) -> Self {
        Self::Reference {
            schema_name: schema_name.into(),
        }
    }

    pub fn container(container: impl Into<String>, element: DisplayToken) -> Self {
        Self::Container {
            container: container.into(),
            element: Box::new(element),
        }
    }

    pub fn list(items: Vec<DisplayToken>) -> Self {
        Self::List { items }
    }

    /// Alternatives when the token lists a `oneOf`
    pub fn alternatives(&self) -> Option<&[DisplayToken]> {
        match self {
            Self::List { items } => Some(items),
            _ => None,
        }
    }

    /// Names of every schema referenced in the token, depth first
    pub fn referenced_schemas(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Text { .. } => {}
            Self::Reference { schema_name } => names.push(schema_name),
            Self::Container { element, .. } => element.collect_references(names),
            Self::List { items } => {
                for item in items {
                    item.collect_references(names);
                }
            }
        }
    }
}

impl fmt::Display for DisplayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { value } => f.write_str(value),
            Self::Reference { schema_name } => f.write_str(schema_name),
            Self::Container { container, element } => write!(f, "{} ({})", container, element),
            Self::List { items } => {
                f.write_str("one of: [")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Describe the type of `schema`
///
/// Fails with [`SchemaError::UnknownSchema`](crate::SchemaError::UnknownSchema)
/// when `schema` belongs to another graph.
pub fn render_type(graph: &SchemaGraph, schema: SchemaId) -> SchemaResult<DisplayToken> {
    TypeRenderer::new(graph).render(schema)
}

/// Describe the definition of `schema`, expanding it even when named
pub fn render_definition(graph: &SchemaGraph, schema: SchemaId) -> SchemaResult<DisplayToken> {
    TypeRenderer::new(graph).render_definition(schema)
}

/// Type description walker
///
/// Tracks the nodes currently being expanded. A node reached again while it
/// is still being expanded is described without recursing: by name when it
/// has one, by its bare kind otherwise.
#[derive(Debug)]
pub struct TypeRenderer<'g> {
    graph: &'g SchemaGraph,
    expanding: HashSet<SchemaId>,
}

impl<'g> TypeRenderer<'g> {
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self {
            graph,
            expanding: HashSet::new(),
        }
    }

    pub fn render(&mut self, id: SchemaId) -> SchemaResult<DisplayToken> {
        let graph = self.graph;
        let node = graph.node(id)?;

        if self.expanding.contains(&id) {
            return Ok(collapsed(node));
        }

        self.expanding.insert(id);
        let token = self.expand(node, node.name.as_deref());
        self.expanding.remove(&id);
        token
    }

    /// Describe what a schema is defined as
    ///
    /// Same as [`render`](Self::render) except that the root is expanded even
    /// when it is named, so a component shows its own shape (`object`,
    /// `array (Pet)`) rather than a reference to itself.
    pub fn render_definition(&mut self, id: SchemaId) -> SchemaResult<DisplayToken> {
        let graph = self.graph;
        let node = graph.node(id)?;

        self.expanding.insert(id);
        let token = self.expand(node, None);
        self.expanding.remove(&id);
        token
    }

    fn expand(&mut self, node: &SchemaNode, name: Option<&str>) -> SchemaResult<DisplayToken> {
        if !node.one_of.is_empty() {
            let items = node
                .one_of
                .iter()
                .map(|alternative| self.render(*alternative))
                .collect::<SchemaResult<Vec<_>>>()?;
            return Ok(DisplayToken::list(items));
        }

        let token = match &node.kind {
            Some(SchemaKind::Object) => match (name, node.additional_properties) {
                (Some(name), _) => DisplayToken::reference(name),
                (None, AdditionalProperties::Schema(element)) => {
                    DisplayToken::container(DICTIONARY_CONTAINER, self.render(element)?)
                }
                (None, _) => DisplayToken::text("object"),
            },
            Some(SchemaKind::Array { items }) => match items {
                Some(items) => DisplayToken::container(ARRAY_CONTAINER, self.render(*items)?),
                None => DisplayToken::text(ARRAY_CONTAINER),
            },
            // allOf members are assumed to share one underlying type, so the
            // first one stands for all of them
            _ => match (name, node.all_of.first()) {
                (Some(name), _) => DisplayToken::reference(name),
                (None, Some(first)) => self.render(*first)?,
                (None, None) => DisplayToken::text(primitive_display(node)),
            },
        };
        Ok(token)
    }
}

fn collapsed(node: &SchemaNode) -> DisplayToken {
    match (&node.name, &node.kind) {
        (Some(name), _) => DisplayToken::reference(name.as_str()),
        (None, Some(SchemaKind::Object)) => DisplayToken::text("object"),
        (None, Some(SchemaKind::Array { .. })) => DisplayToken::text(ARRAY_CONTAINER),
        (None, _) => DisplayToken::text(primitive_display(node)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_and_untyped() {
        let mut graph = SchemaGraph::new();
        let int = graph.insert(SchemaNode::integer()).unwrap();
        let any = graph.insert(SchemaNode::untyped()).unwrap();
        let uuid = graph.insert(SchemaNode::string_with_format("uuid")).unwrap();

        assert_eq!(render_type(&graph, int).unwrap(), DisplayToken::text("integer"));
        assert_eq!(render_type(&graph, any).unwrap(), DisplayToken::text("any"));
        assert_eq!(render_type(&graph, uuid).unwrap(), DisplayToken::text("string"));
    }

    #[test]
    fn test_objects() {
        let mut graph = SchemaGraph::new();
        let s = graph.insert(SchemaNode::string()).unwrap();
        let plain = graph.insert(SchemaNode::object().with_property("s", s)).unwrap();
        let open = graph
            .insert(SchemaNode::object().with_additional_properties(AdditionalProperties::Open))
            .unwrap();
        let dict = graph
            .insert(SchemaNode::object().with_additional_properties(AdditionalProperties::Schema(s)))
            .unwrap();
        let named = graph
            .insert(
                SchemaNode::object()
                    .named("Labels")
                    .with_additional_properties(AdditionalProperties::Schema(s)),
            )
            .unwrap();

        assert_eq!(render_type(&graph, plain).unwrap().to_string(), "object");
        assert_eq!(render_type(&graph, open).unwrap().to_string(), "object");
        assert_eq!(render_type(&graph, dict).unwrap().to_string(), "dictionary (string)");
        assert_eq!(render_type(&graph, named).unwrap(), DisplayToken::reference("Labels"));
    }

    #[test]
    fn test_arrays() {
        let mut graph = SchemaGraph::new();
        let pet = graph.insert(SchemaNode::object().named("Pet")).unwrap();
        let bare = graph.insert(SchemaNode::array(None)).unwrap();
        let pets = graph.insert(SchemaNode::array(Some(pet)).named("Pets")).unwrap();
        let next = graph.next_id();
        let looping = graph.insert(SchemaNode::array(Some(next))).unwrap();

        assert_eq!(render_type(&graph, bare).unwrap().to_string(), "array");
        assert_eq!(
            render_type(&graph, pets).unwrap(),
            DisplayToken::container("array", DisplayToken::reference("Pet"))
        );
        assert_eq!(render_type(&graph, looping).unwrap().to_string(), "array (array)");
    }

    #[test]
    fn test_named_primitive_and_all_of() {
        let mut graph = SchemaGraph::new();
        let id = graph.insert(SchemaNode::string().named("Identifier")).unwrap();
        let base = graph.insert(SchemaNode::object().named("Base")).unwrap();
        let extra = graph.insert(SchemaNode::object()).unwrap();
        let derived = graph
            .insert(SchemaNode::untyped().with_all_of(vec![base, extra]))
            .unwrap();

        assert_eq!(render_type(&graph, id).unwrap(), DisplayToken::reference("Identifier"));
        assert_eq!(render_type(&graph, derived).unwrap(), DisplayToken::reference("Base"));
    }

    #[test]
    fn test_one_of_lists_every_alternative() {
        let mut graph = SchemaGraph::new();
        let cat = graph.insert(SchemaNode::object().named("Cat")).unwrap();
        let dog = graph.insert(SchemaNode::object().named("Dog")).unwrap();
        let n = graph.insert(SchemaNode::number()).unwrap();
        let pet = graph
            .insert(SchemaNode::untyped().with_one_of(vec![cat, dog, n]))
            .unwrap();

        let token = render_type(&graph, pet).unwrap();
        assert_eq!(token.to_string(), "one of: [Cat, Dog, number]");
        assert_eq!(token.alternatives().map(<[_]>::len), Some(3));
        assert_eq!(token.referenced_schemas(), vec!["Cat", "Dog"]);
    }

    #[test]
    fn test_one_of_cycle_collapses() {
        let mut graph = SchemaGraph::new();
        let a = graph.reserve();
        let b = graph.reserve();
        graph
            .define(a, SchemaNode::untyped().named("A").with_one_of(vec![b]))
            .unwrap();
        graph
            .define(b, SchemaNode::untyped().with_one_of(vec![a]))
            .unwrap();

        assert_eq!(render_type(&graph, a).unwrap().to_string(), "one of: [one of: [A]]");
    }

    #[test]
    fn test_definition_expands_named_root() {
        let mut graph = SchemaGraph::new();
        let s = graph.insert(SchemaNode::string()).unwrap();
        let pet = graph.insert(SchemaNode::object().named("Pet")).unwrap();
        let labels = graph
            .insert(
                SchemaNode::object()
                    .named("Labels")
                    .with_additional_properties(AdditionalProperties::Schema(s)),
            )
            .unwrap();
        let pets = graph
            .insert(SchemaNode::array(Some(pet)).named("Pets"))
            .unwrap();
        let next = graph.next_id();
        let node = graph
            .insert(SchemaNode::object().named("Node").with_property("next", next))
            .unwrap();

        assert_eq!(render_definition(&graph, pet).unwrap(), DisplayToken::text("object"));
        assert_eq!(render_definition(&graph, labels).unwrap().to_string(), "dictionary (string)");
        assert_eq!(render_definition(&graph, pets).unwrap().to_string(), "array (Pet)");
        assert_eq!(render_definition(&graph, node).unwrap(), DisplayToken::text("object"));
        assert_eq!(render_type(&graph, pets).unwrap(), DisplayToken::reference("Pets"));
    }

    #[test]
    fn test_token_serialization() {
        let token = DisplayToken::container(
            "dictionary",
            DisplayToken::list(vec![DisplayToken::reference("Pet"), DisplayToken::text("string")]),
        );

        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "container",
                "container": "dictionary",
                "element": {
                    "kind": "list",
                    "items": [
                        {"kind": "reference", "schemaName": "Pet"},
                        {"kind": "text", "value": "string"}
                    ]
                }
            })
        );

        let back: DisplayToken = serde_json::from_value(value).unwrap();
        assert_eq!(back, token);
    }
}

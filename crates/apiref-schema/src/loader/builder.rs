//! Schema graph construction and reference resolution
//!
//! Every entry of `components.schemas` gets a handle up front, so `$ref`s to
//! component schemas (including ones that lead back to the schema being
//! built) resolve to arena handles instead of being expanded. Inline schemas
//! become anonymous nodes. Any other in-document pointer is built once and
//! its handle reused by every later `$ref` to it.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::graph::{AdditionalProperties, SchemaGraph, SchemaId, SchemaKind, SchemaNode};
use crate::loader::error::{LoaderError, LoaderResult};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Prefix of references to component schemas
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Maximum number of hops followed through `$ref`-only objects
const MAX_REFERENCE_HOPS: usize = 32;

/// Builds a [`SchemaGraph`] from the JSON value of an OpenAPI document
#[derive(Debug)]
pub struct GraphBuilder<'d> {
    root: &'d Value,
    graph: SchemaGraph,
    components: IndexMap<String, SchemaId>,
    pointers: HashMap<String, SchemaId>,
}

impl<'d> GraphBuilder<'d> {
    /// Create a builder and define every component schema of `root`
    pub fn new(root: &'d Value) -> LoaderResult<Self> {
        let mut builder = Self {
            root,
            graph: SchemaGraph::new(),
            components: IndexMap::new(),
            pointers: HashMap::new(),
        };

        let schemas = match root.pointer("/components/schemas") {
            Some(Value::Object(schemas)) => schemas,
            Some(_) => {
                return Err(LoaderError::invalid_document(
                    "#/components/schemas",
                    "component schemas must be an object",
                ))
            }
            None => return Ok(builder),
        };

        for (name, body) in schemas {
            if reference_of(body).is_none() {
                let id = builder.graph.reserve();
                builder.components.insert(name.clone(), id);
            }
        }

        // Components that are nothing but a `$ref` share the handle of their target
        let mut ordered = IndexMap::with_capacity(schemas.len());
        for name in schemas.keys() {
            let id = match builder.components.get(name) {
                Some(id) => *id,
                None => builder.resolve_alias(name, schemas)?,
            };
            ordered.insert(name.clone(), id);
        }
        builder.components = ordered;

        for (name, body) in schemas {
            if reference_of(body).is_some() {
                continue;
            }
            let id = builder.components[name];
            let pointer = format!("{}{}", COMPONENT_SCHEMA_PREFIX, escape_segment(name));
            let node = builder.build_node(body, &pointer)?.named(name.as_str());
            builder.graph.define(id, node)?;
        }

        debug!(
            components = builder.components.len(),
            nodes = builder.graph.len(),
            "Defined component schemas"
        );

        Ok(builder)
    }

    /// Component schemas by name, in document order
    pub fn components(&self) -> &IndexMap<String, SchemaId> {
        &self.components
    }

    /// Build (or resolve) the schema at `pointer`
    pub fn build_schema(&mut self, value: &Value, pointer: &str) -> LoaderResult<SchemaId> {
        if let Some(reference) = reference_of(value) {
            return self.resolve_schema_reference(reference, pointer);
        }

        let node = self.build_node(value, pointer)?;
        Ok(self.graph.insert(node)?)
    }

    /// Follow `$ref`s to other parts of the same document (parameters,
    /// request bodies, responses)
    pub fn dereference<'v>(&self, value: &'v Value, pointer: &str) -> LoaderResult<&'v Value>
    where
        'd: 'v,
    {
        let mut current = value;
        let mut chain: Vec<String> = Vec::new();

        while let Some(reference) = reference_of(current) {
            if chain.iter().any(|seen| seen == reference) || chain.len() >= MAX_REFERENCE_HOPS {
                chain.push(reference.to_string());
                return Err(LoaderError::circular_reference(&chain));
            }
            chain.push(reference.to_string());

            let target = reference.strip_prefix('#').ok_or_else(|| {
                LoaderError::reference_error(reference, pointer, "external references are not supported")
            })?;
            current = self.root.pointer(target).ok_or_else(|| {
                LoaderError::reference_error(reference, pointer, "target not found in document")
            })?;
        }

        Ok(current)
    }

    /// Hand over the finished graph and the component index
    pub fn finish(self) -> (SchemaGraph, IndexMap<String, SchemaId>) {
        (self.graph, self.components)
    }

    fn resolve_schema_reference(&mut self, reference: &str, pointer: &str) -> LoaderResult<SchemaId> {
        self.follow_reference(reference, pointer, &mut Vec::new())
    }

    fn follow_reference(
        &mut self,
        reference: &str,
        pointer: &str,
        chain: &mut Vec<String>,
    ) -> LoaderResult<SchemaId> {
        let target = local_target(reference, pointer)?;

        if let Some(name) = component_name(reference) {
            return self.components.get(&name).copied().ok_or_else(|| {
                LoaderError::reference_error(reference, pointer, "schema not defined in components")
            });
        }
        if let Some(id) = self.pointers.get(reference) {
            return Ok(*id);
        }

        if chain.iter().any(|seen| seen == reference) || chain.len() >= MAX_REFERENCE_HOPS {
            chain.push(reference.to_string());
            return Err(LoaderError::circular_reference(chain));
        }
        chain.push(reference.to_string());

        let root = self.root;
        let value = root.pointer(target).ok_or_else(|| {
            LoaderError::reference_error(reference, pointer, "target not found in document")
        })?;

        let id = match reference_of(value) {
            Some(next) => self.follow_reference(next, reference, chain)?,
            None => {
                trace!(reference, "Building schema behind pointer");
                let id = self.graph.reserve();
                self.pointers.insert(reference.to_string(), id);
                let node = self.build_node(value, reference)?;
                self.graph.define(id, node)?;
                id
            }
        };

        self.pointers.insert(reference.to_string(), id);
        Ok(id)
    }

    fn resolve_alias(&mut self, name: &str, schemas: &Map<String, Value>) -> LoaderResult<SchemaId> {
        let mut chain = vec![name.to_string()];
        let mut current = name.to_string();

        loop {
            let pointer = format!("{}{}", COMPONENT_SCHEMA_PREFIX, escape_segment(&current));
            let reference = match schemas.get(&current).and_then(reference_of) {
                Some(reference) => reference,
                None => {
                    return self.components.get(&current).copied().ok_or_else(|| {
                        LoaderError::reference_error(current.as_str(), pointer, "schema not defined in components")
                    })
                }
            };

            let target = match component_name(reference) {
                Some(target) => target,
                None => return self.follow_reference(reference, &pointer, &mut Vec::new()),
            };
            if chain.contains(&target) {
                chain.push(target);
                return Err(LoaderError::circular_reference(&chain));
            }
            trace!(alias = %current, target = %target, "Following schema alias");
            chain.push(target.clone());
            current = target;
        }
    }

    fn build_node(&mut self, value: &Value, pointer: &str) -> LoaderResult<SchemaNode> {
        let object = value.as_object().ok_or_else(|| {
            LoaderError::invalid_document(pointer, "schema must be an object")
        })?;

        let mut node = SchemaNode {
            kind: self.build_kind(object, pointer)?,
            example: author_example(object),
            ..SchemaNode::default()
        };

        if let Some(properties) = object.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                let child = format!("{}/properties/{}", pointer, escape_segment(name));
                let id = self.build_schema(property, &child)?;
                node.properties.insert(name.clone(), id);
            }
        }

        node.additional_properties = match object.get("additionalProperties") {
            None | Some(Value::Bool(false)) => AdditionalProperties::Closed,
            Some(Value::Bool(true)) => AdditionalProperties::Open,
            Some(schema @ Value::Object(_)) => {
                let child = format!("{}/additionalProperties", pointer);
                AdditionalProperties::Schema(self.build_schema(schema, &child)?)
            }
            Some(_) => {
                return Err(LoaderError::invalid_document(
                    pointer,
                    "additionalProperties must be a boolean or a schema",
                ))
            }
        };

        node.all_of = self.build_members(object, "allOf", pointer)?;
        node.one_of = self.build_members(object, "oneOf", pointer)?;

        if object.contains_key("anyOf") || object.contains_key("not") {
            debug!(pointer, "anyOf/not are not expanded");
            node.unsupported_composition = true;
        }

        Ok(node)
    }

    fn build_kind(&mut self, object: &Map<String, Value>, pointer: &str) -> LoaderResult<Option<SchemaKind>> {
        let type_name = match object.get("type") {
            None => return Ok(None),
            Some(Value::String(type_name)) => Some(type_name.as_str()),
            // ["string", "null"]: the nullable marker carries no shape
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|type_name| *type_name != "null"),
            Some(other) => return Err(LoaderError::unsupported_type(pointer, other.to_string())),
        };

        let kind = match type_name {
            None => return Ok(None),
            Some("string") => SchemaKind::String {
                format: object.get("format").and_then(Value::as_str).map(String::from),
            },
            Some("number") => SchemaKind::Number,
            Some("integer") => SchemaKind::Integer,
            Some("boolean") => SchemaKind::Boolean,
            Some("object") => SchemaKind::Object,
            Some("array") => {
                let items = match object.get("items") {
                    Some(items) => Some(self.build_schema(items, &format!("{}/items", pointer))?),
                    None => None,
                };
                SchemaKind::Array { items }
            }
            Some(other) => return Err(LoaderError::unsupported_type(pointer, other)),
        };

        Ok(Some(kind))
    }

    fn build_members(
        &mut self,
        object: &Map<String, Value>,
        keyword: &str,
        pointer: &str,
    ) -> LoaderResult<Vec<SchemaId>> {
        let members = match object.get(keyword) {
            None => return Ok(Vec::new()),
            Some(Value::Array(members)) => members,
            Some(_) => {
                return Err(LoaderError::invalid_document(
                    pointer,
                    format!("{} must be an array", keyword),
                ))
            }
        };

        members
            .iter()
            .enumerate()
            .map(|(index, member)| self.build_schema(member, &format!("{}/{}/{}", pointer, keyword, index)))
            .collect()
    }
}

/// The `$ref` string of a reference object
fn reference_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Author example: `example`, or the first entry of `examples`
fn author_example(object: &Map<String, Value>) -> Option<Value> {
    object.get("example").cloned().or_else(|| {
        object
            .get("examples")
            .and_then(Value::as_array)
            .and_then(|examples| examples.first())
            .cloned()
    })
}

/// JSON pointer of a same-document reference
fn local_target<'r>(reference: &'r str, pointer: &str) -> LoaderResult<&'r str> {
    reference.strip_prefix('#').ok_or_else(|| {
        LoaderError::reference_error(reference, pointer, "external references are not supported")
    })
}

/// Component name when `reference` points straight at a component schema
fn component_name(reference: &str) -> Option<String> {
    reference
        .strip_prefix(COMPONENT_SCHEMA_PREFIX)
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .map(unescape_segment)
}

/// Encode a JSON pointer segment
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

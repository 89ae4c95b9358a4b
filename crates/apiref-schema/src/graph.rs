//! Schema node model and the arena that owns it
//!
//! Nodes reference each other through [`SchemaId`] handles, so a graph may
//! contain cycles (a schema whose items, properties or composition members
//! lead back to itself) without any shared ownership. Walkers compare nodes by
//! handle, never by structure.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

/// Stable handle of a node inside a [`SchemaGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SchemaId(usize);

impl SchemaId {
    /// Position of the node in its arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared type of a schema node, with the fields that only make sense for
/// that type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    String { format: Option<String> },
    Number,
    Integer,
    Boolean,
    Object,
    Array { items: Option<SchemaId> },
}

impl SchemaKind {
    /// The JSON Schema `type` keyword for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array { .. } => "array",
        }
    }

    /// Whether this kind is a scalar (neither object nor array)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Object | Self::Array { .. })
    }
}

/// The `additionalProperties` constraint of an object-like node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalProperties {
    /// Absent or `false`
    #[default]
    Closed,
    /// `true`: any extra property, no schema
    Open,
    /// Extra properties must match the given schema
    Schema(SchemaId),
}

impl AdditionalProperties {
    /// Whether unnamed properties are allowed at all
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Schema constraining unnamed properties, if any
    pub fn schema(&self) -> Option<SchemaId> {
        match self {
            Self::Schema(id) => Some(*id),
            _ => None,
        }
    }
}

/// One node of a schema graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    /// Component name; set for named, reusable schemas
    pub name: Option<String>,
    /// Declared type; `None` when the document leaves it out
    pub kind: Option<SchemaKind>,
    /// Author-supplied example
    pub example: Option<Value>,
    /// Own properties, in declaration order
    pub properties: IndexMap<String, SchemaId>,
    pub additional_properties: AdditionalProperties,
    /// Members whose properties are merged into this node
    pub all_of: Vec<SchemaId>,
    /// Alternatives, in declaration order
    pub one_of: Vec<SchemaId>,
    /// Set when the node uses `anyOf` or `not`, which are not walked but still
    /// make the node composite
    pub unsupported_composition: bool,
}

impl SchemaNode {
    /// A node without a declared type
    pub fn untyped() -> Self {
        Self::default()
    }

    /// A node of the given kind
    pub fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of_kind(SchemaKind::String { format: None })
    }

    pub fn string_with_format(format: impl Into<String>) -> Self {
        Self::of_kind(SchemaKind::String {
            format: Some(format.into()),
        })
    }

    pub fn number() -> Self {
        Self::of_kind(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::of_kind(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::of_kind(SchemaKind::Boolean)
    }

    pub fn object() -> Self {
        Self::of_kind(SchemaKind::Object)
    }

    pub fn array(items: Option<SchemaId>) -> Self {
        Self::of_kind(SchemaKind::Array { items })
    }

    /// Mark the node as a named component
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Add (or replace) a property
    pub fn with_property(mut self, name: impl Into<String>, schema: SchemaId) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_all_of(mut self, members: Vec<SchemaId>) -> Self {
        self.all_of = members;
        self
    }

    pub fn with_one_of(mut self, alternatives: Vec<SchemaId>) -> Self {
        self.one_of = alternatives;
        self
    }

    pub fn with_additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = additional;
        self
    }

    pub fn with_unsupported_composition(mut self) -> Self {
        self.unsupported_composition = true;
        self
    }

    /// Element schema when the node is an array
    pub fn items(&self) -> Option<SchemaId> {
        match &self.kind {
            Some(SchemaKind::Array { items }) => *items,
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, Some(SchemaKind::Array { .. }))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, Some(SchemaKind::Object))
    }

    /// Whether any composition keyword is present
    pub fn is_composite(&self) -> bool {
        !self.all_of.is_empty() || !self.one_of.is_empty() || self.unsupported_composition
    }

    /// Every handle this node points at
    pub fn children(&self) -> impl Iterator<Item = SchemaId> + '_ {
        self.items()
            .into_iter()
            .chain(self.properties.values().copied())
            .chain(self.additional_properties.schema())
            .chain(self.all_of.iter().copied())
            .chain(self.one_of.iter().copied())
    }
}

/// Arena of schema nodes
///
/// Handles are only valid for the graph that created them. Nodes referring to
/// each other in a cycle are built by reserving handles first and defining
/// them afterwards.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    nodes: Vec<SchemaNode>,
}

impl SchemaGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, reserved ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handle the next inserted or reserved node will receive
    pub fn next_id(&self) -> SchemaId {
        SchemaId(self.nodes.len())
    }

    /// Add a node. The node may refer to itself through [`Self::next_id`].
    pub fn insert(&mut self, node: SchemaNode) -> SchemaResult<SchemaId> {
        let id = SchemaId(self.nodes.len());
        self.check_children(id, &node, self.nodes.len() + 1)?;
        self.nodes.push(node);
        Ok(id)
    }

    /// Hand out a handle for a node that will be defined later
    pub fn reserve(&mut self) -> SchemaId {
        let id = SchemaId(self.nodes.len());
        self.nodes.push(SchemaNode::default());
        id
    }

    /// Replace the node behind a reserved (or existing) handle
    pub fn define(&mut self, id: SchemaId, node: SchemaNode) -> SchemaResult<()> {
        if id.0 >= self.nodes.len() {
            return Err(SchemaError::unknown_schema(id));
        }
        self.check_children(id, &node, self.nodes.len())?;
        self.nodes[id.0] = node;
        Ok(())
    }

    pub fn get(&self, id: SchemaId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    /// Look up a node, failing for handles of another graph
    pub fn node(&self, id: SchemaId) -> SchemaResult<&SchemaNode> {
        self.get(id).ok_or(SchemaError::unknown_schema(id))
    }

    /// Whether the handle belongs to this graph
    pub fn contains(&self, id: SchemaId) -> bool {
        id.0 < self.nodes.len()
    }

    /// First node carrying the given component name
    pub fn find_named(&self, name: &str) -> Option<SchemaId> {
        self.iter()
            .find(|(_, node)| node.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// Whether `id` can reach itself through its children
    pub fn is_recursive(&self, id: SchemaId) -> bool {
        let mut pending: Vec<SchemaId> = match self.get(id) {
            Some(node) => node.children().collect(),
            None => return false,
        };
        let mut seen = HashSet::new();

        while let Some(next) = pending.pop() {
            if next == id {
                return true;
            }
            if seen.insert(next) {
                if let Some(node) = self.get(next) {
                    pending.extend(node.children());
                }
            }
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = (SchemaId, &SchemaNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (SchemaId(index), node))
    }

    fn check_children(&self, parent: SchemaId, node: &SchemaNode, bound: usize) -> SchemaResult<()> {
        match node.children().find(|child| child.0 >= bound) {
            Some(child) => Err(SchemaError::dangling_reference(parent, child)),
            None => Ok(()),
        }
    }
}

impl Index<SchemaId> for SchemaGraph {
    type Output = SchemaNode;

    /// # Panics
    ///
    /// Panics if the handle was created by another graph.
    fn index(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0]
    }
}

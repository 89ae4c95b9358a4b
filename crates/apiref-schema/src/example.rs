//! Example value synthesis
//!
//! Produces one representative JSON value for a schema node. Author-supplied
//! examples win, scalars get placeholders, arrays hold a single element (or one
//! element per `oneOf` alternative of their items), `oneOf` picks its first
//! usable alternative and objects list every merged property.
//!
//! The walker keeps the handles of the nodes on the current recursion path.
//! A non-primitive node met again on that path is not expanded a second time:
//! it yields an empty array or object instead, which keeps self- and
//! mutually-referential schemas finite. A recursive node (one that can reach
//! itself) is also expanded at most once per example, so densely connected
//! schemas produce an example whose size grows with the number of schemas
//! rather than with the number of paths between them.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::composition::{merged_properties, select_one_of, unvisited};
use crate::error::SchemaResult;
use crate::graph::{AdditionalProperties, SchemaGraph, SchemaId, SchemaKind, SchemaNode};
use crate::primitive::{is_primitive, primitive_example};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Key under which an example for `additionalProperties` is listed
pub const ADDITIONAL_PROPERTIES_KEY: &str = "<*>";

/// Synthesize an example for `schema`
pub fn example_of(graph: &SchemaGraph, schema: SchemaId) -> SchemaResult<Value> {
    ExampleSynthesizer::new(graph).synthesize(schema)
}

/// Recursive example builder over one graph
#[derive(Debug)]
pub struct ExampleSynthesizer<'g> {
    graph: &'g SchemaGraph,
    visited: HashSet<SchemaId>,
    expanded: HashSet<SchemaId>,
    recursive: HashMap<SchemaId, bool>,
}

impl<'g> ExampleSynthesizer<'g> {
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
            expanded: HashSet::new(),
            recursive: HashMap::new(),
        }
    }

    /// Example for `id`; the walker can be reused for further roots
    pub fn synthesize(&mut self, id: SchemaId) -> SchemaResult<Value> {
        self.visited.clear();
        self.expanded.clear();
        self.visit(id)
    }

    fn visit(&mut self, id: SchemaId) -> SchemaResult<Value> {
        let graph = self.graph;
        let node = graph.node(id)?;

        if let Some(example) = &node.example {
            return Ok(example.clone());
        }

        if is_primitive(node) {
            return primitive_example(node);
        }

        if self.visited.contains(&id) {
            trace!(schema = %id, name = ?node.name, "schema already on path, truncating");
            return Ok(empty_like(node));
        }

        let recursive = self.is_recursive(id);
        if recursive && self.expanded.contains(&id) {
            trace!(schema = %id, name = ?node.name, "recursive schema already expanded, truncating");
            return Ok(empty_like(node));
        }

        self.visited.insert(id);
        let result = self.expand(id, node);
        self.visited.remove(&id);
        if recursive {
            self.expanded.insert(id);
        }
        result
    }

    fn is_recursive(&mut self, id: SchemaId) -> bool {
        let graph = self.graph;
        *self
            .recursive
            .entry(id)
            .or_insert_with(|| graph.is_recursive(id))
    }

    fn expand(&mut self, id: SchemaId, node: &'g SchemaNode) -> SchemaResult<Value> {
        if let Some(SchemaKind::Array { items }) = &node.kind {
            return self.array_example(id, *items);
        }

        if !node.one_of.is_empty() {
            return match select_one_of(node, &self.visited) {
                Some(alternative) => self.visit(alternative),
                None => {
                    trace!(schema = %id, "every oneOf alternative already on path");
                    Ok(Value::Object(Map::new()))
                }
            };
        }

        self.object_example(node)
    }

    fn array_example(&mut self, id: SchemaId, items: Option<SchemaId>) -> SchemaResult<Value> {
        let inner = match items {
            Some(inner) if inner != id => inner,
            _ => return Ok(Value::Array(Vec::new())),
        };

        let graph = self.graph;
        let alternatives = &graph.node(inner)?.one_of;
        if alternatives.is_empty() {
            return Ok(Value::Array(vec![self.visit(inner)?]));
        }

        let pending: Vec<SchemaId> = unvisited(alternatives, &self.visited).collect();
        pending
            .into_iter()
            .map(|alternative| self.visit(alternative))
            .collect::<SchemaResult<Vec<_>>>()
            .map(Value::Array)
    }

    fn object_example(&mut self, node: &SchemaNode) -> SchemaResult<Value> {
        let mut example = Map::new();

        for (name, schema) in merged_properties(self.graph, node) {
            example.insert(name, self.visit(schema)?);
        }

        match node.additional_properties {
            AdditionalProperties::Closed => {}
            AdditionalProperties::Open => {
                example.insert(ADDITIONAL_PROPERTIES_KEY.to_string(), Value::Object(Map::new()));
            }
            AdditionalProperties::Schema(schema) => {
                example.insert(ADDITIONAL_PROPERTIES_KEY.to_string(), self.visit(schema)?);
            }
        }

        Ok(Value::Object(example))
    }
}

fn empty_like(node: &SchemaNode) -> Value {
    if node.is_array() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

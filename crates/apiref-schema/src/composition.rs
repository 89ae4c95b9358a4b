//! `allOf` property merging and `oneOf` alternative selection
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::graph::{SchemaGraph, SchemaId, SchemaNode};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Own properties of `node` merged with those of each `allOf` member
///
/// Members are applied in order and a later definition of a property replaces
/// the earlier one while keeping its original position. Only the members' own
/// properties are merged; nested `allOf` lists are not followed.
pub fn merged_properties(graph: &SchemaGraph, node: &SchemaNode) -> IndexMap<String, SchemaId> {
    let mut properties = node.properties.clone();

    for member in &node.all_of {
        for (name, schema) in &graph[*member].properties {
            properties.insert(name.clone(), *schema);
        }
    }

    properties
}

/// Alternatives of `alternatives` that are not on the visited path, in order
pub fn unvisited<'a>(
    alternatives: &'a [SchemaId],
    visited: &'a HashSet<SchemaId>,
) -> impl Iterator<Item = SchemaId> + 'a {
    alternatives
        .iter()
        .copied()
        .filter(move |alternative| !visited.contains(alternative))
}

/// First `oneOf` alternative of `node` not on the visited path
pub fn select_one_of(node: &SchemaNode, visited: &HashSet<SchemaId>) -> Option<SchemaId> {
    unvisited(&node.one_of, visited).next()
}

//! Scalar schema classification and placeholder values
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::graph::{SchemaKind, SchemaNode};
use serde_json::Value;

/// Display used for nodes without a declared type
pub const ANY_TYPE: &str = "any";

/// A node is primitive when it has a scalar kind and no composition at all
pub fn is_primitive(node: &SchemaNode) -> bool {
    !node.is_composite() && node.kind.as_ref().is_some_and(SchemaKind::is_scalar)
}

/// Placeholder example for a primitive node
///
/// Strings show their format (`"string(date-time)"`), numbers are `0` and
/// booleans `true`.
pub fn primitive_example(node: &SchemaNode) -> SchemaResult<Value> {
    match &node.kind {
        Some(SchemaKind::String { format }) => Ok(Value::String(string_placeholder(format.as_deref()))),
        Some(SchemaKind::Number | SchemaKind::Integer) => Ok(Value::from(0)),
        Some(SchemaKind::Boolean) => Ok(Value::Bool(true)),
        Some(kind) => Err(SchemaError::invalid_primitive(kind.type_name())),
        None => Err(SchemaError::invalid_primitive("<unset>")),
    }
}

/// Display text for a node rendered as a bare kind
///
/// Only the kind is shown; a string `format` appears in examples, not here.
pub fn primitive_display(node: &SchemaNode) -> &'static str {
    node.kind.as_ref().map_or(ANY_TYPE, SchemaKind::type_name)
}

fn string_placeholder(format: Option<&str>) -> String {
    match format {
        Some(format) => format!("string({})", format),
        None => "string".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SchemaGraph, SchemaId};
    use serde_json::json;

    #[test]
    fn test_primitive_examples() {
        assert_eq!(primitive_example(&SchemaNode::string()).unwrap(), json!("string"));
        assert_eq!(
            primitive_example(&SchemaNode::string_with_format("uuid")).unwrap(),
            json!("string(uuid)")
        );
        assert_eq!(primitive_example(&SchemaNode::number()).unwrap(), json!(0));
        assert_eq!(primitive_example(&SchemaNode::integer()).unwrap(), json!(0));
        assert_eq!(primitive_example(&SchemaNode::boolean()).unwrap(), json!(true));
    }

    #[test]
    fn test_invalid_primitive() {
        let err = primitive_example(&SchemaNode::object()).unwrap_err();
        assert_eq!(err, SchemaError::invalid_primitive("object"));

        let err = primitive_example(&SchemaNode::untyped()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPrimitiveSchema { .. }));
    }

    #[test]
    fn test_classification() {
        let mut graph = SchemaGraph::new();
        let member = graph.insert(SchemaNode::string()).unwrap();

        assert!(is_primitive(&SchemaNode::string()));
        assert!(is_primitive(&SchemaNode::boolean()));
        assert!(!is_primitive(&SchemaNode::object()));
        assert!(!is_primitive(&SchemaNode::array(None)));
        assert!(!is_primitive(&SchemaNode::untyped()));
        assert!(!is_primitive(&SchemaNode::string().with_all_of(vec![member])));
        assert!(!is_primitive(&SchemaNode::integer().with_unsupported_composition()));
        assert!(is_primitive(&SchemaNode::integer().with_one_of(Vec::<SchemaId>::new())));
    }

    #[test]
    fn test_primitive_display() {
        assert_eq!(primitive_display(&SchemaNode::integer()), "integer");
        assert_eq!(primitive_display(&SchemaNode::string_with_format("date")), "string");
        assert_eq!(primitive_display(&SchemaNode::untyped()), "any");
    }
}

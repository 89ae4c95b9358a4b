//! Example synthesis and type rendering over hand-built schema graphs
//!
//! These tests cover the observable behaviour of the two walkers on the
//! shapes real API documents produce: primitives, author examples,
//! composition, open maps and cyclic schemas.

use apiref_schema::{
    example_of, render_definition, render_type, AdditionalProperties, DisplayToken, SchemaError,
    SchemaGraph, SchemaKind, SchemaNode,
};
use serde_json::json;

#[cfg(test)]
mod primitives {
    use super::*;

    #[test]
    fn test_placeholder_table() {
        let mut graph = SchemaGraph::new();
        let cases = [
            (SchemaNode::string(), json!("string")),
            (SchemaNode::string_with_format("date-time"), json!("string(date-time)")),
            (SchemaNode::number(), json!(0)),
            (SchemaNode::integer(), json!(0)),
            (SchemaNode::boolean(), json!(true)),
        ];

        for (node, expected) in cases {
            let id = graph.insert(node).unwrap();
            assert_eq!(example_of(&graph, id).unwrap(), expected);
        }
    }

    #[test]
    fn test_author_example_wins_for_every_kind() {
        let mut graph = SchemaGraph::new();
        let item = graph.insert(SchemaNode::string()).unwrap();
        let nodes = [
            SchemaNode::string(),
            SchemaNode::integer(),
            SchemaNode::object().with_property("ignored", item),
            SchemaNode::array(Some(item)),
            SchemaNode::untyped().with_one_of(vec![item]),
        ];

        for node in nodes {
            let id = graph
                .insert(node.with_example(json!({"from": "author"})))
                .unwrap();
            assert_eq!(example_of(&graph, id).unwrap(), json!({"from": "author"}));
        }
    }

    #[test]
    fn test_scalar_with_composition_is_not_primitive() {
        let mut graph = SchemaGraph::new();
        let code = graph.insert(SchemaNode::integer()).unwrap();
        let member = graph.insert(SchemaNode::object().with_property("code", code)).unwrap();
        let composed = graph
            .insert(SchemaNode::string().with_all_of(vec![member]))
            .unwrap();

        assert_eq!(example_of(&graph, composed).unwrap(), json!({"code": 0}));
    }
}

#[cfg(test)]
mod composition {
    use super::*;

    #[test]
    fn test_all_of_merge_is_right_biased() {
        let mut graph = SchemaGraph::new();
        let one = graph.insert(SchemaNode::integer().with_example(json!(1))).unwrap();
        let two = graph.insert(SchemaNode::integer().with_example(json!(2))).unwrap();
        let three = graph.insert(SchemaNode::integer().with_example(json!(3))).unwrap();
        let member = graph
            .insert(SchemaNode::object().with_property("x", two).with_property("y", three))
            .unwrap();
        let base = graph
            .insert(SchemaNode::object().with_property("x", one).with_all_of(vec![member]))
            .unwrap();

        assert_eq!(example_of(&graph, base).unwrap(), json!({"x": 2, "y": 3}));
    }

    #[test]
    fn test_one_of_picks_first_alternative() {
        let mut graph = SchemaGraph::new();
        let s = graph.insert(SchemaNode::string()).unwrap();
        let cat = graph.insert(SchemaNode::object().named("Cat").with_property("meow", s)).unwrap();
        let dog = graph.insert(SchemaNode::object().named("Dog").with_property("bark", s)).unwrap();
        let pet = graph
            .insert(SchemaNode::untyped().with_one_of(vec![cat, dog]))
            .unwrap();

        assert_eq!(example_of(&graph, pet).unwrap(), json!({"meow": "string"}));
    }

    #[test]
    fn test_array_of_one_of_lists_each_alternative() {
        let mut graph = SchemaGraph::new();
        let n = graph.insert(SchemaNode::number()).unwrap();
        let b = graph.insert(SchemaNode::boolean()).unwrap();
        let either = graph.insert(SchemaNode::untyped().with_one_of(vec![n, b])).unwrap();
        let list = graph.insert(SchemaNode::array(Some(either))).unwrap();

        assert_eq!(example_of(&graph, list).unwrap(), json!([0, true]));
        assert_eq!(render_type(&graph, list).unwrap().to_string(), "array (one of: [number, boolean])");
    }

    #[test]
    fn test_one_of_listing_reparses_to_alternative_names() {
        let mut graph = SchemaGraph::new();
        let names = ["Circle", "Square", "Triangle"];
        let alternatives: Vec<_> = names
            .iter()
            .map(|name| graph.insert(SchemaNode::object().named(*name)).unwrap())
            .collect();
        let shape = graph
            .insert(SchemaNode::untyped().with_one_of(alternatives))
            .unwrap();

        let listing = render_type(&graph, shape).unwrap().to_string();
        let inner = listing
            .strip_prefix("one of: [")
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap();
        let parsed: Vec<&str> = inner.split(", ").collect();

        assert_eq!(parsed, names);
    }
}

#[cfg(test)]
mod objects_and_arrays {
    use super::*;

    #[test]
    fn test_additional_properties_sentinel() {
        let mut graph = SchemaGraph::new();
        let s = graph.insert(SchemaNode::string()).unwrap();
        let typed = graph
            .insert(SchemaNode::object().with_additional_properties(AdditionalProperties::Schema(s)))
            .unwrap();
        let open = graph
            .insert(
                SchemaNode::object()
                    .with_property("id", s)
                    .with_additional_properties(AdditionalProperties::Open),
            )
            .unwrap();

        assert_eq!(example_of(&graph, typed).unwrap(), json!({"<*>": "string"}));
        assert_eq!(example_of(&graph, open).unwrap(), json!({"id": "string", "<*>": {}}));
        assert_eq!(render_type(&graph, typed).unwrap().to_string(), "dictionary (string)");
        assert_eq!(render_type(&graph, open).unwrap().to_string(), "object");
    }

    #[test]
    fn test_property_order_is_kept() {
        let mut graph = SchemaGraph::new();
        let s = graph.insert(SchemaNode::string()).unwrap();
        let node = ["zeta", "alpha", "mu"]
            .iter()
            .fold(SchemaNode::object(), |node, name| node.with_property(*name, s));
        let id = graph.insert(node).unwrap();

        let example = example_of(&graph, id).unwrap();
        let keys: Vec<&String> = example.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mu"]);
    }

    #[test]
    fn test_named_array_of_named_objects() {
        let mut graph = SchemaGraph::new();
        let pet = graph.insert(SchemaNode::object().named("Pet")).unwrap();
        let pets = graph.insert(SchemaNode::array(Some(pet)).named("Pets")).unwrap();

        let token = render_type(&graph, pets).unwrap();
        assert_eq!(
            token,
            DisplayToken::container("array", DisplayToken::reference("Pet"))
        );
        assert_eq!(token.referenced_schemas(), vec!["Pet"]);
    }

    #[test]
    fn test_missing_items_degrade_to_empty() {
        let mut graph = SchemaGraph::new();
        let bare = graph.insert(SchemaNode::array(None)).unwrap();
        let empty = graph.insert(SchemaNode::object()).unwrap();
        let choiceless = graph.insert(SchemaNode::untyped()).unwrap();

        assert_eq!(example_of(&graph, bare).unwrap(), json!([]));
        assert_eq!(example_of(&graph, empty).unwrap(), json!({}));
        assert_eq!(example_of(&graph, choiceless).unwrap(), json!({}));
        assert_eq!(render_type(&graph, choiceless).unwrap().to_string(), "any");
    }
}

#[cfg(test)]
mod cycles {
    use super::*;

    #[test]
    fn test_self_array() {
        let mut graph = SchemaGraph::new();
        let id = graph.next_id();
        let looping = graph.insert(SchemaNode::array(Some(id))).unwrap();

        assert_eq!(example_of(&graph, looping).unwrap(), json!([]));
        assert_eq!(render_type(&graph, looping).unwrap().to_string(), "array (array)");
    }

    #[test]
    fn test_mutual_one_of_terminates() {
        let mut graph = SchemaGraph::new();
        let a = graph.reserve();
        let b = graph.reserve();
        let label = graph.insert(SchemaNode::string()).unwrap();
        graph
            .define(a, SchemaNode::untyped().named("A").with_one_of(vec![b]))
            .unwrap();
        graph
            .define(
                b,
                SchemaNode::object()
                    .named("B")
                    .with_property("next", a)
                    .with_property("label", label),
            )
            .unwrap();

        assert_eq!(
            example_of(&graph, a).unwrap(),
            json!({"next": {}, "label": "string"})
        );
        assert_eq!(render_type(&graph, a).unwrap().to_string(), "one of: [B]");
    }

    #[test]
    fn test_one_of_alternatives_all_on_path() {
        let mut graph = SchemaGraph::new();
        let a = graph.reserve();
        let b = graph.reserve();
        graph.define(a, SchemaNode::untyped().with_one_of(vec![b])).unwrap();
        graph.define(b, SchemaNode::untyped().with_one_of(vec![a])).unwrap();

        assert_eq!(example_of(&graph, a).unwrap(), json!({}));
    }

    #[test]
    fn test_recursive_property() {
        let mut graph = SchemaGraph::new();
        let person = graph.reserve();
        let name = graph.insert(SchemaNode::string()).unwrap();
        let friends = graph.insert(SchemaNode::array(Some(person))).unwrap();
        graph
            .define(
                person,
                SchemaNode::object()
                    .named("Person")
                    .with_property("name", name)
                    .with_property("friend", person)
                    .with_property("friends", friends),
            )
            .unwrap();

        assert_eq!(
            example_of(&graph, person).unwrap(),
            json!({"name": "string", "friend": {}, "friends": [{}]})
        );
    }

    #[test]
    fn test_recursive_all_of() {
        let mut graph = SchemaGraph::new();
        let node = graph.reserve();
        let base = graph.reserve();
        let id = graph.insert(SchemaNode::integer()).unwrap();
        graph
            .define(base, SchemaNode::object().named("Base").with_property("child", node))
            .unwrap();
        graph
            .define(
                node,
                SchemaNode::untyped()
                    .named("Node")
                    .with_property("id", id)
                    .with_all_of(vec![base]),
            )
            .unwrap();

        assert_eq!(example_of(&graph, node).unwrap(), json!({"id": 0, "child": {}}));
        assert_eq!(render_type(&graph, node).unwrap(), DisplayToken::reference("Node"));
    }

    #[test]
    fn test_densely_connected_schemas_stay_small() {
        let count = 10;
        let mut graph = SchemaGraph::new();
        let ids: Vec<_> = (0..count).map(|_| graph.reserve()).collect();
        for (index, id) in ids.iter().enumerate() {
            let node = ids
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .fold(SchemaNode::object().named(format!("C{}", index)), |node, (other, target)| {
                    node.with_property(format!("c{}", other), *target)
                });
            graph.define(*id, node).unwrap();
        }

        let example = example_of(&graph, ids[0]).unwrap();
        let size = serde_json::to_string(&example).unwrap().len();
        assert!(size < count * count * 16, "example is {} bytes", size);
        assert_eq!(example["c1"]["c0"], json!({}));
        assert_eq!(example["c2"], json!({}));
    }

    #[test]
    fn test_shared_schemas_expand_everywhere() {
        let mut graph = SchemaGraph::new();
        let street = graph.insert(SchemaNode::string()).unwrap();
        let address = graph
            .insert(SchemaNode::object().named("Address").with_property("street", street))
            .unwrap();
        let person = graph.reserve();
        graph
            .define(
                person,
                SchemaNode::object()
                    .named("Person")
                    .with_property("home", address)
                    .with_property("work", address)
                    .with_property("manager", person),
            )
            .unwrap();
        let team = graph
            .insert(
                SchemaNode::object()
                    .with_property("lead", person)
                    .with_property("deputy", person),
            )
            .unwrap();

        assert_eq!(
            example_of(&graph, team).unwrap(),
            json!({
                "lead": {
                    "home": {"street": "string"},
                    "work": {"street": "string"},
                    "manager": {}
                },
                "deputy": {}
            })
        );
    }

    #[test]
    fn test_dictionary_of_itself() {
        let mut graph = SchemaGraph::new();
        let id = graph.next_id();
        let tree = graph
            .insert(SchemaNode::object().with_additional_properties(AdditionalProperties::Schema(id)))
            .unwrap();

        assert_eq!(example_of(&graph, tree).unwrap(), json!({"<*>": {}}));
        assert_eq!(render_type(&graph, tree).unwrap().to_string(), "dictionary (object)");
    }
}

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn test_foreign_handle_is_reported() {
        let mut other = SchemaGraph::new();
        other.insert(SchemaNode::string()).unwrap();
        let foreign = other.insert(SchemaNode::string()).unwrap();

        let graph = SchemaGraph::new();
        assert_eq!(
            example_of(&graph, foreign),
            Err(SchemaError::UnknownSchema { id: foreign })
        );
        assert_eq!(
            render_type(&graph, foreign),
            Err(SchemaError::UnknownSchema { id: foreign })
        );
        assert_eq!(
            render_definition(&graph, foreign),
            Err(SchemaError::UnknownSchema { id: foreign })
        );
    }

    #[test]
    fn test_dangling_child_is_rejected() {
        let mut graph = SchemaGraph::new();
        let s = graph.insert(SchemaNode::string()).unwrap();
        let ahead = graph.reserve();
        graph.define(ahead, SchemaNode::string()).unwrap();

        let mut other = SchemaGraph::new();
        for _ in 0..5 {
            other.insert(SchemaNode::string()).unwrap();
        }
        let far = other.insert(SchemaNode::string()).unwrap();

        let err = graph
            .insert(SchemaNode::object().with_property("s", s).with_property("far", far))
            .unwrap_err();
        assert!(matches!(err, SchemaError::DanglingReference { child, .. } if child == far));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SchemaKind::Array { items: None }.type_name(), "array");
        assert!(SchemaKind::Boolean.is_scalar());
        assert!(!SchemaKind::Object.is_scalar());
    }
}

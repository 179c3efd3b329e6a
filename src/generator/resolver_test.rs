use serde_json::{json, Value};

use super::resolver::{
    collect_node_properties, scalar_value, union_default_value, union_is_nil_optional, union_pick,
    ResolveCtx,
};
use super::GeneratorOptions;
use crate::domain::{
    DataNode, Example, NodeShape, PropertyShape, ScalarShape, Shape, ShapeKind, UnionShape,
};

fn scalar_shape(data_type: &str) -> Shape {
    Shape::scalar(data_type)
}

fn own_scalar(shape: &Shape) -> &ScalarShape {
    match &shape.kind {
        ShapeKind::Scalar(s) => s,
        other => panic!("expected scalar kind, got {other:?}"),
    }
}

#[test]
fn test_scalar_priority_default_over_example() {
    let shape = Shape {
        default_value: Some(DataNode::string("dflt")),
        examples: vec![Example::from_text("declared")],
        ..scalar_shape("string")
    };
    let opts = GeneratorOptions::default();
    let mut ctx = ResolveCtx::new(&opts);
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!("dflt"))
    );
}

#[test]
fn test_scalar_priority_example_when_requested() {
    let shape = Shape {
        default_value: Some(DataNode::string("dflt")),
        examples: vec![Example::from_text("declared")],
        ..scalar_shape("string")
    };
    let opts = GeneratorOptions::with_examples();
    let mut ctx = ResolveCtx::new(&opts);
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!("declared"))
    );
}

#[test]
fn test_scalar_enum_first_value() {
    let shape = Shape {
        kind: ShapeKind::Scalar(ScalarShape {
            data_type: "string".to_string(),
            values: vec![DataNode::string("male"), DataNode::string("female")],
            ..ScalarShape::default()
        }),
        ..Shape::default()
    };
    let opts = GeneratorOptions::default();
    let mut ctx = ResolveCtx::new(&opts);
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!("male"))
    );
}

#[test]
fn test_scalar_enum_coerces_per_data_type() {
    let shape = Shape {
        kind: ShapeKind::Scalar(ScalarShape {
            data_type: "integer".to_string(),
            values: vec![DataNode::scalar("10", "string")],
            ..ScalarShape::default()
        }),
        ..Shape::default()
    };
    let opts = GeneratorOptions::default();
    let mut ctx = ResolveCtx::new(&opts);
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!(10))
    );
}

#[test]
fn test_scalar_inherited_default() {
    let parent = Shape {
        id: "#parent".to_string(),
        default_value: Some(DataNode::string("inherited")),
        ..scalar_shape("string")
    };
    let shape = Shape {
        inherits: vec![parent],
        ..scalar_shape("string")
    };
    let opts = GeneratorOptions::default();
    let mut ctx = ResolveCtx::new(&opts);
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!("inherited"))
    );
}

#[test]
fn test_scalar_synthesized_fallback() {
    let shape = scalar_shape("number");
    let opts = GeneratorOptions::default();
    let mut ctx = ResolveCtx::new(&opts);
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!(0))
    );
}

#[test]
fn test_cyclic_inherits_resolves_to_synthesized_default() {
    // "#a" inherits a copy of itself; the revisit must not recurse.
    let inner = Shape {
        id: "#a".to_string(),
        ..scalar_shape("string")
    };
    let shape = Shape {
        id: "#a".to_string(),
        inherits: vec![Shape {
            inherits: vec![inner],
            ..scalar_shape("string")
        }],
        ..scalar_shape("string")
    };
    let opts = GeneratorOptions::default();
    let mut ctx = ResolveCtx::new(&opts);
    assert!(ctx.enter(&shape));
    assert_eq!(
        scalar_value(&shape, own_scalar(&shape), &mut ctx),
        Some(json!(""))
    );
}

#[test]
fn test_union_nil_optional_convention() {
    let optional = UnionShape {
        any_of: vec![scalar_shape("string"), scalar_shape("nil")],
    };
    assert!(union_is_nil_optional(&optional));

    let not_optional = UnionShape {
        any_of: vec![
            scalar_shape("string"),
            Shape {
                kind: ShapeKind::Node(NodeShape::default()),
                ..Shape::default()
            },
            scalar_shape("nil"),
        ],
    };
    assert!(!union_is_nil_optional(&not_optional));

    let two_nils = UnionShape {
        any_of: vec![
            scalar_shape("string"),
            scalar_shape("nil"),
            scalar_shape("nil"),
        ],
    };
    assert!(!union_is_nil_optional(&two_nils));
}

#[test]
fn test_union_default_disambiguation() {
    let union = UnionShape {
        any_of: vec![scalar_shape("number"), scalar_shape("nil")],
    };
    let shape = Shape {
        default_value: Some(DataNode::string("123456")),
        kind: ShapeKind::Union(union.clone()),
        ..Shape::default()
    };
    assert_eq!(union_default_value(&shape, &union), Some(json!(123456)));

    let bool_union = UnionShape {
        any_of: vec![scalar_shape("boolean"), scalar_shape("nil")],
    };
    let shape = Shape {
        default_value: Some(DataNode::string("true")),
        kind: ShapeKind::Union(bool_union.clone()),
        ..Shape::default()
    };
    assert_eq!(union_default_value(&shape, &bool_union), Some(json!(true)));

    let nil_union = UnionShape {
        any_of: vec![scalar_shape("string"), scalar_shape("nil")],
    };
    let shape = Shape {
        default_value: Some(DataNode::string("null")),
        kind: ShapeKind::Union(nil_union.clone()),
        ..Shape::default()
    };
    assert_eq!(union_default_value(&shape, &nil_union), Some(Value::Null));
}

#[test]
fn test_union_pick_selected_member() {
    let union = UnionShape {
        any_of: vec![
            Shape {
                id: "#cat".to_string(),
                ..scalar_shape("string")
            },
            Shape {
                id: "#dog".to_string(),
                ..scalar_shape("string")
            },
        ],
    };
    let opts = GeneratorOptions {
        selected_unions: vec!["#dog".to_string()],
        ..GeneratorOptions::default()
    };
    assert_eq!(union_pick(&union, &opts).map(|s| s.id.as_str()), Some("#dog"));

    let opts = GeneratorOptions::default();
    assert_eq!(union_pick(&union, &opts).map(|s| s.id.as_str()), Some("#cat"));
}

#[test]
fn test_collect_node_properties_child_wins() {
    let parent = Shape {
        id: "#p".to_string(),
        kind: ShapeKind::Node(NodeShape {
            properties: vec![
                PropertyShape {
                    name: "x".to_string(),
                    range: scalar_shape("string"),
                    min_count: 1,
                },
                PropertyShape {
                    name: "y".to_string(),
                    range: scalar_shape("string"),
                    min_count: 1,
                },
            ],
            ..NodeShape::default()
        }),
        ..Shape::default()
    };
    let child = Shape {
        id: "#c".to_string(),
        inherits: vec![parent],
        kind: ShapeKind::Node(NodeShape {
            properties: vec![PropertyShape {
                name: "x".to_string(),
                range: scalar_shape("number"),
                min_count: 1,
            }],
            ..NodeShape::default()
        }),
        ..Shape::default()
    };
    let properties = collect_node_properties(&child);
    assert_eq!(properties.len(), 2);
    let x = properties.iter().find(|p| p.name == "x").unwrap();
    assert!(matches!(&x.range.kind, ShapeKind::Scalar(s) if s.data_type == "number"));
}

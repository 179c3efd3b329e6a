//! JSON example generation.
//!
//! Builds a native `serde_json::Value` tree for a shape, then serializes
//! it with the shared formatting rule (pretty, 2-space indent; a bare
//! string is returned unquoted). Object properties keep declaration
//! order, with inherited properties merged first so the child wins on
//! name collisions.

use serde_json::{Map, Value};

use crate::domain::{
    AnyShape, ArrayShape, NodeShape, ScalarType, Shape, ShapeKind, TupleShape, UnionShape,
};

use super::resolver::{self, ResolveCtx};
use super::{data_node_reader, GeneratorOptions};

#[derive(Debug, Default)]
pub struct JsonExampleGenerator;

impl JsonExampleGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates the native value tree for a shape. `None` means the shape
    /// has no representative value (empty unions, optional-by-convention
    /// unions, files, raw schema references).
    pub fn generate(&self, shape: &Shape, opts: &GeneratorOptions) -> Option<Value> {
        let mut ctx = ResolveCtx::new(opts);
        process(shape, &mut ctx)
    }

    /// Generates serialized JSON text for a shape.
    pub fn generate_text(&self, shape: &Shape, opts: &GeneratorOptions) -> Option<String> {
        value_to_text(&self.generate(shape, opts)?)
    }
}

/// Shared JSON text rule: bare strings are not re-quoted.
pub(crate) fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        v => serde_json::to_string_pretty(v).ok(),
    }
}

fn process(shape: &Shape, ctx: &mut ResolveCtx) -> Option<Value> {
    if !ctx.enter(shape) {
        return None;
    }
    let value = match &shape.kind {
        ShapeKind::Scalar(scalar) => resolver::scalar_value(shape, scalar, ctx),
        ShapeKind::Node(node) => node_value(shape, node, ctx),
        ShapeKind::Array(array) => array_value(shape, array, ctx),
        ShapeKind::Tuple(tuple) => tuple_value(shape, tuple, ctx),
        ShapeKind::Union(union) => union_value(shape, union, ctx),
        // Files and raw schema references have no generatable value unless
        // an explicit default or example overrides them.
        ShapeKind::File(_) | ShapeKind::SchemaRef(_) => {
            resolver::explicit_value(shape, ScalarType::Unknown, ctx)
        }
        ShapeKind::Any(any) => any_value(shape, any, ctx),
    };
    ctx.leave(shape);
    value
}

fn node_value(shape: &Shape, node: &NodeShape, ctx: &mut ResolveCtx) -> Option<Value> {
    if ctx.opts.render_examples {
        if let Some(value) = resolver::example_value_with_parents(shape) {
            return Some(value);
        }
    }
    let mut map = Map::new();
    for parent in &shape.inherits {
        if let Some(Value::Object(parent_map)) = process(parent, ctx) {
            for (key, value) in parent_map {
                map.insert(key, value);
            }
        }
    }
    for property in &node.properties {
        if property.min_count == 0 && !ctx.opts.render_optional {
            continue;
        }
        if let Some(value) = process(&property.range, ctx) {
            map.insert(property.name.clone(), value);
        }
    }
    Some(Value::Object(map))
}

fn array_value(shape: &Shape, array: &ArrayShape, ctx: &mut ResolveCtx) -> Option<Value> {
    if ctx.opts.render_examples {
        if let Some(value) = resolver::array_example_value(shape, array) {
            return Some(value);
        }
    }
    if let Some(default) = &shape.default_value {
        return data_node_reader::read(default);
    }
    // One representative item proves the shape without padding the output.
    let mut members = Vec::new();
    if let Some(items) = array.items.as_deref() {
        if let Some(value) = process(items, ctx) {
            members.push(value);
        }
    }
    Some(Value::Array(members))
}

fn tuple_value(shape: &Shape, tuple: &TupleShape, ctx: &mut ResolveCtx) -> Option<Value> {
    if ctx.opts.render_examples {
        if let Some(value) = resolver::example_value(shape) {
            return Some(value);
        }
    }
    if let Some(default) = &shape.default_value {
        return data_node_reader::read(default);
    }
    let members: Vec<Value> = tuple
        .items
        .iter()
        .filter_map(|item| process(item, ctx))
        .collect();
    Some(Value::Array(members))
}

fn union_value(shape: &Shape, union: &UnionShape, ctx: &mut ResolveCtx) -> Option<Value> {
    if union.any_of.is_empty() {
        return None;
    }
    if ctx.opts.render_examples {
        if let Some(value) = resolver::example_value_with_parents(shape) {
            return Some(value);
        }
    }
    if let Some(value) = resolver::union_default_value(shape, union) {
        return Some(value);
    }
    if resolver::union_is_nil_optional(union) {
        return None;
    }
    let member = resolver::union_pick(union, ctx.opts)?;
    process(member, ctx)
}

fn any_value(shape: &Shape, any: &AnyShape, ctx: &mut ResolveCtx) -> Option<Value> {
    let mut map = Map::new();
    let mut merged = false;
    for conjunct in &any.and {
        if let Some(Value::Object(conjunct_map)) = process(conjunct, ctx) {
            for (key, value) in conjunct_map {
                map.insert(key, value);
            }
            merged = true;
        }
    }
    if merged {
        return Some(Value::Object(map));
    }
    resolver::explicit_value(shape, ScalarType::Unknown, ctx)
}

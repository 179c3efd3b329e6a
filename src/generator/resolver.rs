//! Shared value-selection policy.
//!
//! Both format generators decide *which* value represents a shape the same
//! way; only the rendering differs. The rules live here:
//!
//! - scalar selection, in strict priority: explicit default (when examples
//!   are not requested), first declared example (when they are), first enum
//!   value, first defined value among inherited parents, synthesized
//!   default;
//! - the "scalar plus nil means optional" union convention;
//! - union member disambiguation (example, type-disambiguated default,
//!   `selected_unions`, first member);
//! - property collection across `inherits` chains (child wins on name
//!   collision);
//! - a visited-shape-id guard so a cyclic `inherits` graph resolves to
//!   "no value" instead of recursing forever.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::{
    ArrayShape, Example, PropertyShape, ScalarShape, ScalarType, Shape, ShapeKind, UnionShape,
};

use super::{coerce, data_node_reader, GeneratorOptions};

/// Per-call resolution state: the caller's options plus the visited-id set
/// used to break inheritance cycles. Ids are released when a subtree
/// completes, so a shape shared by two properties still renders twice.
pub(crate) struct ResolveCtx<'a> {
    pub opts: &'a GeneratorOptions,
    visited: HashSet<String>,
}

impl<'a> ResolveCtx<'a> {
    pub fn new(opts: &'a GeneratorOptions) -> Self {
        Self {
            opts,
            visited: HashSet::new(),
        }
    }

    /// Marks a shape as in-progress; `false` means the shape is already on
    /// the current path and must resolve to "no value".
    pub fn enter(&mut self, shape: &Shape) -> bool {
        if shape.id.is_empty() {
            return true;
        }
        self.visited.insert(shape.id.clone())
    }

    pub fn leave(&mut self, shape: &Shape) {
        if !shape.id.is_empty() {
            self.visited.remove(&shape.id);
        }
    }
}

/// Resolves the value representing a scalar shape: the explicit-value
/// chain first, then a synthesized default as the unconditional fallback.
pub(crate) fn scalar_value(
    shape: &Shape,
    scalar: &ScalarShape,
    ctx: &mut ResolveCtx,
) -> Option<Value> {
    explicit_value(shape, scalar.scalar_type(), ctx).or_else(|| coerce::synthesize_default(scalar))
}

/// The explicit part of scalar resolution: default value, declared
/// example, enum value, then inherited parents, in that order. Synthesis
/// is not part of this chain; parent traversal looks for
/// values someone actually wrote down.
pub(crate) fn explicit_value(
    shape: &Shape,
    scalar_type: ScalarType,
    ctx: &mut ResolveCtx,
) -> Option<Value> {
    if !ctx.opts.render_examples {
        if let Some(default) = &shape.default_value {
            return data_node_reader::read(default);
        }
    }
    if ctx.opts.render_examples {
        if let Some(example) = shape.examples.iter().find(|e| e.has_raw_value()) {
            let raw = example.value.as_deref().unwrap_or_default();
            return Some(coerce::coerce(raw, scalar_type));
        }
    }
    if let ShapeKind::Scalar(scalar) = &shape.kind {
        if let Some(first) = scalar.values.first() {
            return match first.scalar_text() {
                Some(text) => Some(coerce::coerce(text, scalar_type)),
                None => data_node_reader::read(first),
            };
        }
    }
    for parent in &shape.inherits {
        if !ctx.enter(parent) {
            continue;
        }
        let parent_type = match &parent.kind {
            ShapeKind::Scalar(s) => s.scalar_type(),
            _ => scalar_type,
        };
        let value = explicit_value(parent, parent_type, ctx);
        ctx.leave(parent);
        if value.is_some() {
            return value;
        }
    }
    None
}

/// First renderable example on the shape itself.
pub(crate) fn example_value(shape: &Shape) -> Option<Value> {
    shape.examples.iter().find_map(render_example)
}

/// First renderable example on the shape or, failing that, any of its
/// inherited parents (in order).
pub(crate) fn example_value_with_parents(shape: &Shape) -> Option<Value> {
    example_value(shape).or_else(|| shape.inherits.iter().find_map(example_value))
}

fn render_example(example: &Example) -> Option<Value> {
    if let Some(node) = &example.structured_value {
        return data_node_reader::read(node);
    }
    let raw = example.value.as_deref().filter(|v| !v.is_empty())?;
    Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

/// Example preferred for an array shape: its own, else the item shape's.
pub(crate) fn array_example_value(shape: &Shape, array: &ArrayShape) -> Option<Value> {
    example_value(shape).or_else(|| array.items.as_deref().and_then(example_value))
}

/// The "scalar plus nil means optional" convention: a union is treated as
/// not required when a single nil-typed member exists and every other
/// member is scalar- or file-typed.
pub(crate) fn union_is_nil_optional(union: &UnionShape) -> bool {
    let mut nil_members = 0usize;
    for member in &union.any_of {
        if member.is_nil() {
            nil_members += 1;
        } else if !matches!(member.kind, ShapeKind::Scalar(_) | ShapeKind::File(_)) {
            return false;
        }
    }
    nil_members == 1
}

/// Reads a union's declared default value, disambiguating scalar text
/// against the member data types: numeric text coerces to a number when a
/// numeric member exists, boolean literals to a boolean, nil spellings to
/// null, anything else stays a string.
pub(crate) fn union_default_value(shape: &Shape, union: &UnionShape) -> Option<Value> {
    let default = shape.default_value.as_ref()?;
    match default.scalar_text() {
        Some(text) => Some(coerce_union_text(text, union)),
        None => data_node_reader::read(default),
    }
}

fn coerce_union_text(text: &str, union: &UnionShape) -> Value {
    let types: Vec<ScalarType> = union
        .any_of
        .iter()
        .filter_map(|m| match &m.kind {
            ShapeKind::Scalar(s) => Some(s.scalar_type()),
            _ => None,
        })
        .collect();
    if types.contains(&ScalarType::Number) {
        if let Ok(int) = text.trim().parse::<i64>() {
            return Value::from(int);
        }
        if let Ok(float) = text.trim().parse::<f64>() {
            if float.is_finite() {
                return Value::from(float);
            }
        }
    }
    if types.contains(&ScalarType::Boolean) && (text == "true" || text == "false") {
        return Value::Bool(text == "true");
    }
    if types.contains(&ScalarType::Nil) && (text == "nil" || text == "null") {
        return Value::Null;
    }
    Value::String(text.to_string())
}

/// Picks the union member to generate: a `selected_unions` match first,
/// else the first member.
pub(crate) fn union_pick<'s>(union: &'s UnionShape, opts: &GeneratorOptions) -> Option<&'s Shape> {
    union
        .any_of
        .iter()
        .find(|m| !m.id.is_empty() && opts.selected_unions.contains(&m.id))
        .or_else(|| union.any_of.first())
}

/// Collects the effective property list of a node shape: inherited
/// parents first (in order), own properties last, deduplicated by name
/// with the later declaration winning.
pub(crate) fn collect_node_properties(shape: &Shape) -> Vec<&PropertyShape> {
    let mut out: IndexMap<&str, &PropertyShape> = IndexMap::new();
    let mut seen = HashSet::new();
    collect_properties_into(shape, &mut out, &mut seen);
    out.into_values().collect()
}

fn collect_properties_into<'s>(
    shape: &'s Shape,
    out: &mut IndexMap<&'s str, &'s PropertyShape>,
    seen: &mut HashSet<&'s str>,
) {
    if !shape.id.is_empty() && !seen.insert(shape.id.as_str()) {
        return;
    }
    for parent in &shape.inherits {
        collect_properties_into(parent, out, seen);
    }
    if let ShapeKind::Node(node) = &shape.kind {
        for property in &node.properties {
            out.insert(property.name.as_str(), property);
        }
    }
}

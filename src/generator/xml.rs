//! XML example generation.
//!
//! XML is emitted as text directly rather than through an intermediate
//! value tree: attribute-vs-element placement, namespace prefixes, and
//! array wrapping are per-property decisions with no JSON equivalent.
//! Rendering carries an indent (2 spaces per depth) and an optional
//! `force_name` a parent uses to supply the child's tag name (wrapped
//! array items, union members rendered under the union's own name).

use serde_json::Value;

use crate::domain::{
    AnyShape, ArrayShape, PropertyShape, ScalarType, Shape, ShapeKind, TupleShape, UnionShape,
};

use super::data_node_reader;
use super::resolver::{self, ResolveCtx};
use super::GeneratorOptions;

#[derive(Debug, Default)]
pub struct XmlExampleGenerator;

impl XmlExampleGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates XML text for a shape. `None` means the shape has no
    /// representative value for this format.
    pub fn generate(&self, shape: &Shape, opts: &GeneratorOptions) -> Option<String> {
        let mut ctx = ResolveCtx::new(opts);
        process(shape, &XmlPos::root(), &mut ctx)
    }
}

/// Rendering position: nesting depth, a parent-supplied tag name, and
/// `bare` for content emitted without its own wrapper element (unwrapped
/// array items).
#[derive(Debug, Clone, Default)]
struct XmlPos {
    indent: usize,
    force_name: Option<String>,
    bare: bool,
}

impl XmlPos {
    fn root() -> Self {
        Self::default()
    }

    fn child(indent: usize, force_name: Option<String>) -> Self {
        Self {
            indent,
            force_name,
            bare: false,
        }
    }

    fn bare(indent: usize) -> Self {
        Self {
            indent,
            force_name: None,
            bare: true,
        }
    }
}

/// Strips every character other than letters, digits, hyphen, underscore,
/// and dot, the set valid in the tag names this engine emits.
pub(crate) fn normalize_tag_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

fn indent_block(text: &str, indent: usize) -> String {
    let prefix = pad(indent);
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The tag name for a shape at this position: the parent-supplied name
/// wins, then the shape's XML serialization name, then its name, then its
/// display name. `None` when nothing resolves; such shapes emit content
/// without a wrapper.
fn tag_name(shape: &Shape, pos: &XmlPos) -> Option<String> {
    let candidate = pos
        .force_name
        .clone()
        .or_else(|| shape.xml.as_ref().and_then(|x| x.name.clone()))
        .or_else(|| shape.label().map(str::to_string))?;
    let normalized = normalize_tag_name(&candidate);
    (!normalized.is_empty()).then_some(normalized)
}

/// Tag with the shape's XML prefix applied, when declared.
fn qualified_tag(shape: &Shape, tag: &str) -> String {
    match shape.xml.as_ref().and_then(|x| x.prefix.as_deref()) {
        Some(prefix) if !normalize_tag_name(prefix).is_empty() => {
            format!("{}:{tag}", normalize_tag_name(prefix))
        }
        _ => tag.to_string(),
    }
}

/// `xmlns` / `xmlns:prefix` attribute text for a shape's declared
/// namespace, empty when there is none.
fn namespace_attr(shape: &Shape) -> String {
    let Some(xml) = shape.xml.as_ref() else {
        return String::new();
    };
    let Some(namespace) = xml.namespace.as_deref() else {
        return String::new();
    };
    match xml.prefix.as_deref().map(normalize_tag_name).filter(|p| !p.is_empty()) {
        Some(prefix) => format!(" xmlns:{prefix}=\"{}\"", escape_attr(namespace)),
        None => format!(" xmlns=\"{}\"", escape_attr(namespace)),
    }
}

fn scalar_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        v => v.to_string(),
    }
}

/// Wraps already-rendered child lines in an element, or emits them bare
/// when no tag name resolved.
fn assemble(
    shape: &Shape,
    tag: Option<String>,
    attrs: &str,
    children: Vec<String>,
    pos: &XmlPos,
) -> Option<String> {
    let children: Vec<String> = children
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .collect();
    match tag {
        Some(tag) if !pos.bare => {
            let tag = qualified_tag(shape, &tag);
            let ns = namespace_attr(shape);
            let prefix = pad(pos.indent);
            if children.is_empty() {
                Some(format!("{prefix}<{tag}{ns}{attrs}></{tag}>"))
            } else {
                Some(format!(
                    "{prefix}<{tag}{ns}{attrs}>\n{}\n{prefix}</{tag}>",
                    children.join("\n")
                ))
            }
        }
        _ => {
            if children.is_empty() {
                None
            } else {
                Some(children.join("\n"))
            }
        }
    }
}

fn process(shape: &Shape, pos: &XmlPos, ctx: &mut ResolveCtx) -> Option<String> {
    if !ctx.enter(shape) {
        return None;
    }
    let rendered = match &shape.kind {
        ShapeKind::Scalar(scalar) => {
            resolver::scalar_value(shape, scalar, ctx).map(|v| render_scalar(shape, &v, pos))
        }
        ShapeKind::Node(_) => {
            let properties = resolver::collect_node_properties(shape);
            render_node(shape, &properties, pos, ctx)
        }
        ShapeKind::Array(array) => render_array(shape, array, pos, ctx),
        ShapeKind::Tuple(tuple) => render_tuple(shape, tuple, pos, ctx),
        ShapeKind::Union(union) => render_union(shape, union, pos, ctx),
        ShapeKind::File(_) | ShapeKind::SchemaRef(_) => {
            resolver::explicit_value(shape, ScalarType::Unknown, ctx)
                .map(|v| render_scalar(shape, &v, pos))
        }
        ShapeKind::Any(any) => render_any(shape, any, pos, ctx),
    };
    ctx.leave(shape);
    rendered
}

fn render_scalar(shape: &Shape, value: &Value, pos: &XmlPos) -> String {
    let text = escape_text(&scalar_display(value));
    match tag_name(shape, pos) {
        Some(tag) if !pos.bare => {
            let tag = qualified_tag(shape, &tag);
            let ns = namespace_attr(shape);
            format!("{}<{tag}{ns}>{text}</{tag}>", pad(pos.indent))
        }
        _ => format!("{}{text}", pad(pos.indent)),
    }
}

/// First renderable example on the shape or its parents, as indented XML.
fn example_xml(shape: &Shape, tag: Option<&str>, indent: usize) -> Option<String> {
    let example = shape
        .examples
        .iter()
        .chain(shape.inherits.iter().flat_map(|p| p.examples.iter()))
        .find(|e| e.value.is_some() || e.structured_value.is_some())?;
    let text = match &example.structured_value {
        Some(node) => data_node_reader::to_xml(node, tag)?,
        None => example.value.clone()?,
    };
    Some(indent_block(&text, indent))
}

fn render_node(
    shape: &Shape,
    properties: &[&PropertyShape],
    pos: &XmlPos,
    ctx: &mut ResolveCtx,
) -> Option<String> {
    let tag = tag_name(shape, pos);
    if ctx.opts.render_examples {
        if let Some(text) = example_xml(shape, tag.as_deref(), pos.indent) {
            return Some(text);
        }
    }
    let child_indent = if tag.is_some() && !pos.bare {
        pos.indent + 1
    } else {
        pos.indent
    };
    let mut attrs = String::new();
    let mut children = Vec::new();
    for property in properties {
        if property.min_count == 0 && !ctx.opts.render_optional {
            continue;
        }
        let range = &property.range;
        if is_attribute_property(range) {
            if let ShapeKind::Scalar(scalar) = &range.kind {
                if let Some(value) = resolver::scalar_value(range, scalar, ctx) {
                    let name = attribute_name(property);
                    attrs.push_str(&format!(
                        " {name}=\"{}\"",
                        escape_attr(&scalar_display(&value))
                    ));
                }
            }
            continue;
        }
        let child_tag = property_tag(property);
        if let Some(rendered) = process(range, &XmlPos::child(child_indent, child_tag), ctx) {
            children.push(rendered);
        }
    }
    assemble(shape, tag, &attrs, children, pos)
}

/// A property renders as an attribute only when its range carries
/// `attribute: true` *and* the range is a scalar.
fn is_attribute_property(range: &Shape) -> bool {
    range.xml.as_ref().is_some_and(|x| x.attribute) && matches!(range.kind, ShapeKind::Scalar(_))
}

fn attribute_name(property: &PropertyShape) -> String {
    let candidate = property
        .range
        .xml
        .as_ref()
        .and_then(|x| x.name.as_deref())
        .unwrap_or(&property.name);
    let normalized = normalize_tag_name(candidate);
    if normalized.is_empty() {
        normalize_tag_name(&property.name)
    } else {
        normalized
    }
}

fn property_tag(property: &PropertyShape) -> Option<String> {
    let candidate = property
        .range
        .xml
        .as_ref()
        .and_then(|x| x.name.as_deref())
        .unwrap_or(&property.name);
    let normalized = normalize_tag_name(candidate);
    (!normalized.is_empty()).then_some(normalized)
}

fn render_array(
    shape: &Shape,
    array: &ArrayShape,
    pos: &XmlPos,
    ctx: &mut ResolveCtx,
) -> Option<String> {
    let tag = tag_name(shape, pos);
    if ctx.opts.render_examples {
        if let Some(text) = example_xml(shape, tag.as_deref(), pos.indent) {
            return Some(text);
        }
        if let Some(items) = array.items.as_deref() {
            if let Some(text) = example_xml(items, tag.as_deref(), pos.indent) {
                return Some(text);
            }
        }
    }
    if let Some(default) = &shape.default_value {
        let text = data_node_reader::to_xml(default, tag.as_deref())?;
        return Some(indent_block(&text, pos.indent));
    }
    let child_indent = if tag.is_some() && !pos.bare {
        pos.indent + 1
    } else {
        pos.indent
    };
    let wrapped = shape.xml.as_ref().is_some_and(|x| x.wrapped);
    let mut children = Vec::new();
    if let Some(items) = array.items.as_deref() {
        let item_pos = if wrapped {
            // Wrapped: one element per item, named after the item shape.
            XmlPos::child(child_indent, None)
        } else {
            XmlPos::bare(child_indent)
        };
        if let Some(rendered) = process(items, &item_pos, ctx) {
            children.push(rendered);
        }
    }
    assemble(shape, tag, "", children, pos)
}

fn render_tuple(
    shape: &Shape,
    tuple: &TupleShape,
    pos: &XmlPos,
    ctx: &mut ResolveCtx,
) -> Option<String> {
    let tag = tag_name(shape, pos);
    if ctx.opts.render_examples {
        if let Some(text) = example_xml(shape, tag.as_deref(), pos.indent) {
            return Some(text);
        }
    }
    if let Some(default) = &shape.default_value {
        let text = data_node_reader::to_xml(default, tag.as_deref())?;
        return Some(indent_block(&text, pos.indent));
    }
    let child_indent = if tag.is_some() && !pos.bare {
        pos.indent + 1
    } else {
        pos.indent
    };
    let children: Vec<String> = tuple
        .items
        .iter()
        .filter_map(|item| process(item, &XmlPos::child(child_indent, None), ctx))
        .collect();
    assemble(shape, tag, "", children, pos)
}

fn render_union(
    shape: &Shape,
    union: &UnionShape,
    pos: &XmlPos,
    ctx: &mut ResolveCtx,
) -> Option<String> {
    if union.any_of.is_empty() {
        return None;
    }
    let tag = tag_name(shape, pos);
    if ctx.opts.render_examples {
        if let Some(text) = example_xml(shape, tag.as_deref(), pos.indent) {
            return Some(text);
        }
    }
    if let Some(value) = resolver::union_default_value(shape, union) {
        return Some(render_scalar(shape, &value, pos));
    }
    if resolver::union_is_nil_optional(union) {
        return None;
    }
    let member = resolver::union_pick(union, ctx.opts)?;
    // The chosen member renders under the union's own name.
    let member_pos = XmlPos {
        indent: pos.indent,
        force_name: tag.or_else(|| pos.force_name.clone()),
        bare: pos.bare,
    };
    process(member, &member_pos, ctx)
}

fn render_any(
    shape: &Shape,
    any: &AnyShape,
    pos: &XmlPos,
    ctx: &mut ResolveCtx,
) -> Option<String> {
    let mut properties: Vec<&PropertyShape> = Vec::new();
    for conjunct in &any.and {
        for property in resolver::collect_node_properties(conjunct) {
            properties.retain(|existing| existing.name != property.name);
            properties.push(property);
        }
    }
    if !properties.is_empty() {
        return render_node(shape, &properties, pos, ctx);
    }
    resolver::explicit_value(shape, ScalarType::Unknown, ctx)
        .map(|v| render_scalar(shape, &v, pos))
}

//! Example text reading.
//!
//! Given a declared example (raw text and/or a structured value) and a
//! target mime type, picks the best textual representation: the raw text
//! when it plausibly already matches the mime, otherwise a regeneration
//! from the structured value.

use crate::domain::{DataNode, Example, Shape, ShapeKind};

use super::data_node_reader;

/// Returns the best textual representation of an example for a mime type.
///
/// The raw text is reused when it "looks like" the mime (JSON text starts
/// with `{` or `[`, XML with `<`, URL-encoded text contains `=` or `&`;
/// any other mime always matches). Otherwise the structured value is
/// re-rendered, using `shape` (when supplied) to pick the wrapping name
/// for XML and URL-encoded scalar and array cases.
pub fn read(example: &Example, mime: Option<&str>, shape: Option<&Shape>) -> Option<String> {
    if example.value.is_none() && example.structured_value.is_none() {
        return None;
    }
    let Some(raw) = example.value.as_deref() else {
        // Structured only: a mime is required to know how to render it.
        let mime = mime?;
        return regenerate(example.structured_value.as_ref()?, mime, shape);
    };
    let Some(mime) = mime else {
        return Some(raw.to_string());
    };
    if matches_mime(raw, mime) {
        return Some(raw.to_string());
    }
    match &example.structured_value {
        Some(node) => regenerate(node, mime, shape).or_else(|| Some(raw.to_string())),
        None => Some(raw.to_string()),
    }
}

fn matches_mime(raw: &str, mime: &str) -> bool {
    let trimmed = raw.trim_start();
    if mime.contains("json") {
        trimmed.starts_with('{') || trimmed.starts_with('[')
    } else if mime.contains("xml") {
        trimmed.starts_with('<')
    } else if mime.contains("x-www-form-urlencoded") || mime.contains("urlencoded") {
        raw.contains('=') || raw.contains('&')
    } else {
        true
    }
}

fn regenerate(node: &DataNode, mime: &str, shape: Option<&Shape>) -> Option<String> {
    if mime.contains("json") {
        data_node_reader::to_json(node)
    } else if mime.contains("xml") {
        let name = shape.and_then(wrap_name);
        data_node_reader::to_xml(node, name.as_deref())
    } else if mime.contains("x-www-form-urlencoded") || mime.contains("urlencoded") {
        let name = shape.and_then(wrap_name);
        data_node_reader::to_url_encoded(node, name.as_deref())
    } else {
        data_node_reader::to_json(node)
    }
}

/// The wrapping tag name a shape implies: a scalar contributes its own
/// name, an array contributes its item shape's name (falling back to the
/// array's own).
fn wrap_name(shape: &Shape) -> Option<String> {
    match &shape.kind {
        ShapeKind::Array(array) => array
            .items
            .as_deref()
            .and_then(|i| i.label())
            .or(shape.label())
            .map(str::to_string),
        _ => shape.label().map(str::to_string),
    }
}

//! Literal data-node rendering.
//!
//! Pure recursive descent over [`DataNode`] trees: produces a native value
//! tree, JSON text, XML text, or URL-encoded text. No shape-level policy
//! lives here; callers decide *which* node to render.

use serde_json::Value;

use crate::domain::{DataNode, ScalarType};

use super::coerce;
use super::xml::{escape_text, normalize_tag_name};

/// Converts a data node into a native value tree.
///
/// Scalars coerce per their declared data type; array members and object
/// entries that resolve to "no value" are skipped. Object property names
/// are URL-decoded.
pub fn read(node: &DataNode) -> Option<Value> {
    match node {
        DataNode::Scalar { value, data_type } => {
            let raw = value.as_deref()?;
            let scalar_type = data_type
                .as_deref()
                .map(ScalarType::from_name)
                .unwrap_or(ScalarType::Str);
            Some(coerce::coerce(raw, scalar_type))
        }
        DataNode::Array { members } => {
            Some(Value::Array(members.iter().filter_map(read).collect()))
        }
        DataNode::Object { properties } => {
            let mut map = serde_json::Map::new();
            for (name, value) in properties {
                if let Some(v) = read(value) {
                    map.insert(decode_name(name), v);
                }
            }
            Some(Value::Object(map))
        }
    }
}

fn decode_name(name: &str) -> String {
    urlencoding::decode(name)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| name.to_string())
}

/// Renders a data node as JSON text (pretty, 2-space indent).
///
/// A bare string value is returned unescaped rather than re-quoted.
pub fn to_json(node: &DataNode) -> Option<String> {
    match read(node)? {
        Value::String(s) => Some(s),
        value => serde_json::to_string_pretty(&value).ok(),
    }
}

/// Renders a data node as XML text.
///
/// With a `shape_name`, a scalar or an array of scalars wraps each entry
/// as `<shape_name>value</shape_name>`, one per line. Everything else goes
/// through a generic object-to-XML folding routine that emits one element
/// per key and recurses into nested objects and arrays; array members fold
/// through numeric index tags, which a post-pass strips back out.
pub fn to_xml(node: &DataNode, shape_name: Option<&str>) -> Option<String> {
    let value = read(node)?;
    let name = shape_name.map(normalize_tag_name).filter(|n| !n.is_empty());

    if let Some(name) = &name {
        match &value {
            Value::Array(members) if members.iter().all(is_scalar) => {
                let tags: Vec<String> = members
                    .iter()
                    .map(|m| format!("<{name}>{}</{name}>", escape_text(&scalar_text(m))))
                    .collect();
                return Some(tags.join("\n"));
            }
            v if is_scalar(v) => {
                return Some(format!("<{name}>{}</{name}>", escape_text(&scalar_text(v))));
            }
            _ => {}
        }
    }

    let folded = match &value {
        Value::Object(map) => fold_entries(&mut map.iter().map(|(k, v)| (k.as_str(), v))),
        Value::Array(members) => fold_array(members),
        v => escape_text(&scalar_text(v)),
    };
    let folded = strip_numeric_tags(&folded);
    match name {
        Some(name) => Some(format!("<{name}>\n{folded}\n</{name}>")),
        None => Some(folded),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        v => v.to_string(),
    }
}

fn fold_entries<'a>(entries: &mut dyn Iterator<Item = (&'a str, &'a Value)>) -> String {
    let mut lines = Vec::new();
    for (key, value) in entries {
        let tag = normalize_tag_name(key);
        if tag.is_empty() {
            continue;
        }
        match value {
            Value::Object(map) => {
                let inner = fold_entries(&mut map.iter().map(|(k, v)| (k.as_str(), v)));
                lines.push(format!("<{tag}>\n{inner}\n</{tag}>"));
            }
            Value::Array(members) => {
                let inner = fold_array(members);
                lines.push(format!("<{tag}>\n{inner}\n</{tag}>"));
            }
            v => lines.push(format!("<{tag}>{}</{tag}>", escape_text(&scalar_text(v)))),
        }
    }
    lines.join("\n")
}

/// Folds array members through their index as the tag name; the numeric
/// tags are an artifact and get stripped afterwards.
fn fold_array(members: &[Value]) -> String {
    let indexed: Vec<(String, &Value)> = members
        .iter()
        .enumerate()
        .map(|(i, m)| (i.to_string(), m))
        .collect();
    fold_entries(&mut indexed.iter().map(|(k, v)| (k.as_str(), *v)))
}

/// Removes `<N>`/`</N>` tags whose name is purely numeric, then drops the
/// lines that end up empty.
fn strip_numeric_tags(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' {
            let mut j = i + 1;
            if j < bytes.len() && bytes[j] == b'/' {
                j += 1;
            }
            let digits_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start && j < bytes.len() && bytes[j] == b'>' {
                i = j + 1;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    // Only ASCII tag bytes were removed, so the buffer is still valid UTF-8.
    let out = String::from_utf8(out).unwrap_or_else(|e| {
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    });
    out.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a data node as URL-encoded text.
///
/// A scalar with a `shape_name` renders as `name=value`; an array of
/// scalars as one `name[]=value` pair per entry. Objects fold to
/// `&`-joined `key=value` pairs with percent-encoded values (form style:
/// newlines normalized to CRLF, spaces as `+`). Explicit nulls render as
/// the literal string `null`.
pub fn to_url_encoded(node: &DataNode, shape_name: Option<&str>) -> Option<String> {
    let value = read(node)?;
    match &value {
        Value::Array(members) if members.iter().all(is_scalar) => {
            let name = shape_name?;
            let pairs: Vec<String> = members
                .iter()
                .map(|m| format!("{name}[]={}", encode_scalar(m)))
                .collect();
            Some(pairs.join("&"))
        }
        Value::Object(map) => {
            let mut pairs = Vec::new();
            collect_pairs(map, &mut pairs);
            Some(pairs.join("&"))
        }
        Value::Array(_) => None,
        v => {
            let name = shape_name?;
            Some(format!("{name}={}", encode_scalar(v)))
        }
    }
}

fn collect_pairs(map: &serde_json::Map<String, Value>, pairs: &mut Vec<String>) {
    for (key, value) in map {
        match value {
            Value::Object(nested) => collect_pairs(nested, pairs),
            Value::Array(members) => {
                for member in members {
                    if is_scalar(member) {
                        pairs.push(format!("{key}[]={}", encode_scalar(member)));
                    }
                }
            }
            v => pairs.push(format!("{key}={}", encode_scalar(v))),
        }
    }
}

fn encode_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        v => form_encode(&scalar_text(v)),
    }
}

/// Percent-encodes a form value: newlines normalized to CRLF, spaces as `+`.
fn form_encode(value: &str) -> String {
    let normalized = value.replace("\r\n", "\n").replace('\n', "\r\n");
    urlencoding::encode(&normalized).replace("%20", "+")
}

//! The shape graph data model.
//!
//! Shapes are polymorphic type definitions produced by an external schema
//! graph provider (the parser for RAML/OAS-style API documents). The engine
//! treats them as immutable input: every field here is plain data, and the
//! whole model derives serde so graphs can be loaded from JSON or YAML
//! documents.

use serde::{Deserialize, Serialize};

use super::data_node::DataNode;
use super::example::Example;

/// A polymorphic type definition node in the schema graph.
///
/// Common attributes live on the struct; kind-specific attributes live in
/// [`ShapeKind`]. `inherits` lists parent shapes used for inheritance and
/// composition; in well-formed documents it forms a DAG.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Stable identifier within the source graph.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared examples attached to this shape.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    /// Explicit default value, as a literal data node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DataNode>,
    /// Parent shapes, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<Shape>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub write_only: bool,
    /// Per-shape override for XML rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<XmlSerialization>,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Shorthand for a scalar shape of the given data type.
    pub fn scalar(data_type: impl Into<String>) -> Self {
        Self {
            kind: ShapeKind::Scalar(ScalarShape {
                data_type: data_type.into(),
                ..ScalarShape::default()
            }),
            ..Self::default()
        }
    }

    /// The label used when a human-readable name is needed: `name` first,
    /// then `display_name`.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.display_name.as_deref())
    }

    /// Whether this shape is a scalar of the nil family.
    pub fn is_nil(&self) -> bool {
        match &self.kind {
            ShapeKind::Scalar(s) => s.scalar_type() == ScalarType::Nil,
            _ => false,
        }
    }
}

/// Closed set of shape kinds, tagged in documents via a `kind` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeKind {
    Scalar(ScalarShape),
    Node(NodeShape),
    Array(ArrayShape),
    Tuple(TupleShape),
    Union(UnionShape),
    File(FileShape),
    /// Opaque raw schema reference (e.g. an inlined JSON schema or XSD).
    SchemaRef(SchemaShape),
    /// Fallback / intersection shape.
    Any(AnyShape),
}

impl Default for ShapeKind {
    fn default() -> Self {
        Self::Any(AnyShape::default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarShape {
    /// Declared data type name. XSD-style URIs are accepted; only the
    /// fragment after `#` participates in primitive-kind mapping.
    #[serde(default)]
    pub data_type: String,
    /// Enum values, as literal data nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<DataNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Sub-format hint (`rfc3339`, `rfc2616`, `date-time`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ScalarShape {
    pub fn scalar_type(&self) -> ScalarType {
        ScalarType::from_name(&self.data_type)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeShape {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyShape>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayShape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Shape>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default)]
    pub unique_items: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleShape {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Shape>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionShape {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Shape>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileShape {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaShape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyShape {
    /// Intersection conjuncts (`and` composition).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<Shape>,
}

/// A named field on a node shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyShape {
    pub name: String,
    pub range: Shape,
    /// `0` marks the property optional.
    #[serde(default)]
    pub min_count: u32,
}

/// Per-shape override describing XML tag name, namespace/prefix,
/// attribute-vs-element placement, and array wrapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XmlSerialization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub attribute: bool,
    #[serde(default)]
    pub wrapped: bool,
}

/// Fixed, closed set of primitive kinds a scalar data type can map to.
///
/// Unmapped data-type names fall back to [`ScalarType::Unknown`], which
/// coerces like a string but synthesizes no default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Str,
    Number,
    Boolean,
    Nil,
    Date,
    Time,
    DateTime,
    DateTimeOnly,
    Unknown,
}

impl ScalarType {
    /// Maps a declared data-type name to its primitive kind.
    ///
    /// Accepts both bare names (`integer`, `dateTime`) and XSD-style URIs
    /// (`http://www.w3.org/2001/XMLSchema#integer`); for URIs only the
    /// fragment after `#` is considered.
    pub fn from_name(name: &str) -> Self {
        let short = name.rsplit('#').next().unwrap_or(name);
        match short {
            "string" => Self::Str,
            "number" | "integer" | "int" | "long" | "float" | "double" | "decimal" => Self::Number,
            "boolean" | "bool" => Self::Boolean,
            "nil" | "null" => Self::Nil,
            "date" | "date-only" | "dateOnly" => Self::Date,
            "time" | "time-only" | "timeOnly" => Self::Time,
            "dateTime" | "datetime" | "date-time" => Self::DateTime,
            "dateTimeOnly" | "datetime-only" | "date-time-only" => Self::DateTimeOnly,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_mapping() {
        assert_eq!(ScalarType::from_name("string"), ScalarType::Str);
        assert_eq!(ScalarType::from_name("integer"), ScalarType::Number);
        assert_eq!(ScalarType::from_name("double"), ScalarType::Number);
        assert_eq!(ScalarType::from_name("boolean"), ScalarType::Boolean);
        assert_eq!(ScalarType::from_name("nil"), ScalarType::Nil);
        assert_eq!(ScalarType::from_name("dateTimeOnly"), ScalarType::DateTimeOnly);
        assert_eq!(ScalarType::from_name("anyURI"), ScalarType::Unknown);
    }

    #[test]
    fn test_scalar_type_from_xsd_uri() {
        assert_eq!(
            ScalarType::from_name("http://www.w3.org/2001/XMLSchema#integer"),
            ScalarType::Number
        );
        assert_eq!(
            ScalarType::from_name("http://www.w3.org/2001/XMLSchema#string"),
            ScalarType::Str
        );
    }

    #[test]
    fn test_shape_round_trip() {
        let shape = Shape {
            id: "#user".to_string(),
            name: Some("User".to_string()),
            kind: ShapeKind::Node(NodeShape {
                properties: vec![PropertyShape {
                    name: "id".to_string(),
                    range: Shape::scalar("string"),
                    min_count: 1,
                }],
                ..NodeShape::default()
            }),
            ..Shape::default()
        };
        let text = serde_json::to_string(&shape).unwrap();
        let back: Shape = serde_json::from_str(&text).unwrap();
        assert_eq!(back.name.as_deref(), Some("User"));
        match back.kind {
            ShapeKind::Node(node) => assert_eq!(node.properties.len(), 1),
            other => panic!("expected node shape, got {other:?}"),
        }
    }
}

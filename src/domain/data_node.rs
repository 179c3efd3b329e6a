//! Literal data-node trees.
//!
//! A [`DataNode`] is the structured form of an explicit example or default
//! value: a scalar literal, an array of nodes, or an object keyed by
//! property name. Object properties keep their declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A literal structured value attached to a shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DataNode {
    Scalar {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_type: Option<String>,
    },
    Array {
        #[serde(default)]
        members: Vec<DataNode>,
    },
    Object {
        #[serde(default)]
        properties: IndexMap<String, DataNode>,
    },
}

impl DataNode {
    /// Scalar node with a value and a declared data type.
    pub fn scalar(value: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::Scalar {
            value: Some(value.into()),
            data_type: Some(data_type.into()),
        }
    }

    /// Scalar string node.
    pub fn string(value: impl Into<String>) -> Self {
        Self::scalar(value, "string")
    }

    pub fn array(members: Vec<DataNode>) -> Self {
        Self::Array { members }
    }

    pub fn object(properties: impl IntoIterator<Item = (String, DataNode)>) -> Self {
        Self::Object {
            properties: properties.into_iter().collect(),
        }
    }

    /// The raw scalar text, when this node is a scalar with a value.
    pub fn scalar_text(&self) -> Option<&str> {
        match self {
            Self::Scalar { value, .. } => value.as_deref(),
            _ => None,
        }
    }
}

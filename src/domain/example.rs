//! Example records.

use serde::{Deserialize, Serialize};

use super::data_node::DataNode;

/// An example declared on a shape: raw literal text and/or its parsed
/// structured form. Both fields are optional; an example with neither is
/// not renderable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Raw literal text, as written in the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Parsed literal form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_value: Option<DataNode>,
}

impl Example {
    pub fn from_text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn from_structured(node: DataNode) -> Self {
        Self {
            structured_value: Some(node),
            ..Self::default()
        }
    }

    /// Whether the raw text is present and non-empty.
    pub fn has_raw_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// A generated example produced by the facade, wrapping the rendered text
/// with the media type it was rendered for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedExample {
    pub media_type: String,
    /// The rendered example text.
    pub value: String,
    /// Raw text of the shape's first declared example, carried forward for
    /// traceability when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_raw: Option<String>,
}

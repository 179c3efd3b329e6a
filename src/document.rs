//! Shape document loading.
//!
//! A shape document is a serialized collection of root shapes: the form
//! a schema-graph provider hands over, or a file authored directly for
//! testing and CLI use. Supports JSON and YAML based on file extension.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::Shape;
use crate::error::DocumentError;

/// A named collection of root shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl ShapeDocument {
    /// Loads a document from a JSON or YAML file, dispatching on the
    /// file extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let document: Self = match extension {
            "json" => serde_json::from_str(&content).map_err(|source| DocumentError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|source| DocumentError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            other => return Err(DocumentError::UnsupportedExtension(other.to_string())),
        };
        info!(
            path = %path.display(),
            shapes = document.shapes.len(),
            "loaded shape document"
        );
        Ok(document)
    }

    /// Finds a shape by name, display name, or id.
    pub fn find(&self, needle: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| {
            s.name.as_deref() == Some(needle)
                || s.display_name.as_deref() == Some(needle)
                || s.id == needle
        })
    }

    /// Names of all root shapes, for listings.
    pub fn shape_names(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .filter_map(|s| s.label().or(Some(s.id.as_str())))
            .collect()
    }
}

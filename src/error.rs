//! Error types for the document-loading surface.
//!
//! The generation engine itself never errors: unsupported mime types and
//! unrepresentable shapes yield `None`. Errors only arise when reading
//! shape documents from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a shape document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error
    #[error("YAML parse error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file extension maps to no supported format
    #[error("unsupported document extension: {0}")]
    UnsupportedExtension(String),
}

//! The example generation engine.
//!
//! [`ExampleGenerator`] is the entry point: it selects the JSON or XML
//! generator by mime type and exposes generation as serialized text, as a
//! native value, or wrapped in a [`GeneratedExample`] record. The
//! submodules carry the moving parts: typed coercion, literal data-node
//! rendering, the shared value-selection policy, and the two format
//! generators.

pub mod coerce;
pub mod data_node_reader;
pub mod example_reader;
pub mod json;
mod resolver;
pub mod xml;

#[cfg(test)]
mod resolver_test;

use serde_json::Value;
use tracing::debug;

use crate::domain::{GeneratedExample, Shape};

pub use json::JsonExampleGenerator;
pub use xml::XmlExampleGenerator;

/// Options controlling value selection during generation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Prefer declared examples over default values.
    pub render_examples: bool,
    /// Include properties (and union branches) declared optional via
    /// `min_count == 0`.
    pub render_optional: bool,
    /// Permit synthesized defaults. Kept for parity with the recognized
    /// option set; synthesis is the unconditional final fallback of
    /// scalar resolution.
    pub render_mocked: bool,
    /// Shape ids preferred when disambiguating a union that has no
    /// example or default.
    pub selected_unions: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            render_examples: false,
            render_optional: false,
            render_mocked: true,
            selected_unions: Vec::new(),
        }
    }
}

impl GeneratorOptions {
    /// Options preferring declared examples.
    pub fn with_examples() -> Self {
        Self {
            render_examples: true,
            ..Self::default()
        }
    }
}

enum Format {
    Json,
    Xml,
}

/// Mime families are matched by substring; anything without `json` or
/// `xml` selects no generator. URL-encoded rendering is reachable only
/// through [`data_node_reader`] and [`example_reader`].
fn format_for(mime: &str) -> Option<Format> {
    if mime.contains("json") {
        Some(Format::Json)
    } else if mime.contains("xml") {
        Some(Format::Xml)
    } else {
        debug!(mime, "no example generator for mime type");
        None
    }
}

/// Facade over the format generators.
#[derive(Debug, Default)]
pub struct ExampleGenerator;

impl ExampleGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates serialized example text for a shape, or `None` when the
    /// mime type has no generator or the shape has no representative
    /// value.
    pub fn generate(
        &self,
        shape: &Shape,
        mime: &str,
        opts: &GeneratorOptions,
    ) -> Option<String> {
        match format_for(mime)? {
            Format::Json => JsonExampleGenerator::new().generate_text(shape, opts),
            Format::Xml => XmlExampleGenerator::new().generate(shape, opts),
        }
    }

    /// Generates the raw native value without the example wrapper. XML
    /// output is carried as a string value.
    pub fn as_schema(
        &self,
        shape: &Shape,
        mime: &str,
        opts: &GeneratorOptions,
    ) -> Option<Value> {
        match format_for(mime)? {
            Format::Json => JsonExampleGenerator::new().generate(shape, opts),
            Format::Xml => XmlExampleGenerator::new()
                .generate(shape, opts)
                .map(Value::String),
        }
    }

    /// Generates an example record: the rendered text with its media
    /// type, carrying forward the shape's first declared example's raw
    /// text when present.
    pub fn as_example(
        &self,
        shape: &Shape,
        mime: &str,
        opts: &GeneratorOptions,
    ) -> Option<GeneratedExample> {
        let value = self.generate(shape, mime, opts)?;
        Some(GeneratedExample {
            media_type: mime.to_string(),
            value,
            source_raw: shape.examples.first().and_then(|e| e.value.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Example;
    use serde_json::json;

    fn named_number() -> Shape {
        Shape {
            name: Some("Count".to_string()),
            ..Shape::scalar("number")
        }
    }

    #[test]
    fn test_mime_selection() {
        let generator = ExampleGenerator::new();
        let opts = GeneratorOptions::default();
        let shape = named_number();

        assert_eq!(
            generator.generate(&shape, "application/json", &opts).as_deref(),
            Some("0")
        );
        assert_eq!(
            generator.generate(&shape, "application/xml", &opts).as_deref(),
            Some("<Count>0</Count>")
        );
        // Vendor mimes match by substring.
        assert!(generator
            .generate(&shape, "application/vnd.api+json", &opts)
            .is_some());
    }

    #[test]
    fn test_unsupported_mime_selects_no_generator() {
        let generator = ExampleGenerator::new();
        let opts = GeneratorOptions::default();
        let shape = named_number();
        assert_eq!(generator.generate(&shape, "text/plain", &opts), None);
        assert_eq!(
            generator.generate(&shape, "application/x-www-form-urlencoded", &opts),
            None
        );
        assert_eq!(generator.as_schema(&shape, "text/plain", &opts), None);
        assert!(generator.as_example(&shape, "text/plain", &opts).is_none());
    }

    #[test]
    fn test_as_schema_native_forms() {
        let generator = ExampleGenerator::new();
        let opts = GeneratorOptions::default();
        let shape = named_number();
        assert_eq!(
            generator.as_schema(&shape, "application/json", &opts),
            Some(json!(0))
        );
        assert_eq!(
            generator.as_schema(&shape, "application/xml", &opts),
            Some(json!("<Count>0</Count>"))
        );
    }

    #[test]
    fn test_as_example_carries_source_raw() {
        let generator = ExampleGenerator::new();
        let shape = Shape {
            examples: vec![Example::from_text("42")],
            ..named_number()
        };
        let example = generator
            .as_example(&shape, "application/json", &GeneratorOptions::default())
            .unwrap();
        assert_eq!(example.media_type, "application/json");
        assert_eq!(example.value, "0");
        assert_eq!(example.source_raw.as_deref(), Some("42"));
    }
}

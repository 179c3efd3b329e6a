//! # Eidolon - Shape-to-Example Generation Engine
//!
//! Eidolon turns polymorphic type definitions ("shapes") from an API
//! schema graph into representative example payloads, rendered as JSON
//! text, XML text, URL-encoded text, or a native value tree.
//!
//! ## Features
//!
//! - **Value-selection policy**: explicit default, declared examples,
//!   enum values, inherited values, and synthesized defaults, applied in
//!   a fixed priority order
//! - **Union disambiguation**: including the "scalar + nil = optional"
//!   convention and caller-selected union branches
//! - **Format-aware XML**: attribute-vs-element placement, namespaces
//!   and prefixes, wrapped and unwrapped arrays
//! - **Never raises**: malformed values degrade to the type's zero value;
//!   unsupported mime types yield `None`
//! - **Documents**: shape graphs load from JSON or YAML files
//!
//! ## Quick Start
//!
//! ```rust
//! use eidolon::domain::Shape;
//! use eidolon::generator::{ExampleGenerator, GeneratorOptions};
//!
//! let shape = Shape {
//!     name: Some("Count".to_string()),
//!     ..Shape::scalar("number")
//! };
//! let generator = ExampleGenerator::new();
//! let text = generator.generate(&shape, "application/json", &GeneratorOptions::default());
//! assert_eq!(text.as_deref(), Some("0"));
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: the shape graph model (shapes, data nodes, examples),
//!   owned by the external schema-graph provider and never mutated here
//! - **Generator**: typed coercion, literal data-node rendering, the
//!   shared value resolver, and the JSON/XML generators behind a facade
//! - **Document**: JSON/YAML loading for CLI and test use

pub mod cli;
pub mod document;
pub mod domain;
pub mod error;
pub mod generator;

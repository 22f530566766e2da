//! Render plausible sample values from JSON Schema / OpenAPI schema nodes.
//!
//! [`renderer::SchemaRenderer`] walks a schema graph and produces a
//! `serde_json::Value`; [`mock::MockGenerator`] picks between literal
//! examples and a rendered schema and encodes the result as JSON or YAML.
pub mod document;
pub mod mock;
pub mod path_de;
pub mod renderer;
pub mod schema;
pub mod supplier;

pub use document::{Components, Document, DocumentError, SchemaResolver};
pub use mock::{Example, MediaType, MockEncoding, MockError, MockGenerator, Mockable};
pub use renderer::SchemaRenderer;
pub use schema::{Schema, SchemaRef, SchemaType};
pub use supplier::Dictionary;

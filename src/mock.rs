//! Mock Façade: pick a data source for a mockable node (inline example,
//! named examples, or schema) and serialize the result.
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::document::{DocumentError, SchemaResolver};
use crate::renderer::SchemaRenderer;
use crate::schema::{Schema, SchemaRef};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("nothing to mock: no example, no named examples and no schema")]
    NotMockable,

    #[error("schema cannot be rendered: a required reference cycle never terminates")]
    Unsatisfiable,

    #[error("schema reference `{0}` does not resolve")]
    UnresolvedReference(String),

    #[error("failed to encode mock as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode mock as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockEncoding {
    #[default]
    Json,
    Yaml,
}

/// Where a mockable node keeps its schema.
#[derive(Debug, Clone, Copy)]
pub enum SchemaSource<'a> {
    Direct(&'a Schema),
    /// A wrapper that may still need resolving (inline or `$ref`).
    Holder(&'a SchemaRef),
}

/// Anything that can be mocked. Each source is optional; the façade
/// decides which one to use.
pub trait Mockable {
    fn example(&self) -> Option<&Value> {
        None
    }
    fn examples(&self) -> Option<&IndexMap<String, Example>> {
        None
    }
    fn schema(&self) -> Option<SchemaSource<'_>> {
        None
    }
}

/// A named example entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Value>,
    pub external_value: Option<String>,
}

/// A document node carrying `example`, `examples` and `schema`: media types,
/// parameters and headers all share this shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default, deserialize_with = "crate::schema::present_value")]
    pub example: Option<Value>,
    #[serde(default)]
    pub examples: IndexMap<String, Example>,
    pub schema: Option<SchemaRef>,
}

impl Mockable for MediaType {
    fn example(&self) -> Option<&Value> {
        self.example.as_ref()
    }
    fn examples(&self) -> Option<&IndexMap<String, Example>> {
        (!self.examples.is_empty()).then_some(&self.examples)
    }
    fn schema(&self) -> Option<SchemaSource<'_>> {
        self.schema.as_ref().map(SchemaSource::Holder)
    }
}

impl Mockable for Schema {
    fn schema(&self) -> Option<SchemaSource<'_>> {
        Some(SchemaSource::Direct(self))
    }
}

impl Mockable for SchemaRef {
    fn schema(&self) -> Option<SchemaSource<'_>> {
        Some(SchemaSource::Holder(self))
    }
}

impl Example {
    fn to_value(&self) -> Value {
        match (&self.value, &self.external_value) {
            (Some(value), _) => value.clone(),
            (None, Some(external)) => Value::String(external.clone()),
            (None, None) => Value::Null,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// GENERATOR
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    encoding: MockEncoding,
    pretty: bool,
    renderer: SchemaRenderer,
}

impl MockGenerator {
    pub fn new(encoding: MockEncoding) -> Self {
        Self { encoding, ..Self::default() }
    }

    /// Indent JSON output. YAML is always block-indented.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn with_renderer(mut self, renderer: SchemaRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn disable_required_check(mut self) -> Self {
        self.renderer = self.renderer.disable_required_check();
        self
    }

    pub fn renderer(&self) -> &SchemaRenderer {
        &self.renderer
    }

    /// Produce the mock value tree. `name` selects a named example; empty or
    /// unmatched names fall back to the first one.
    pub fn mock_value(&self, mock: &dyn Mockable, name: &str, resolver: &dyn SchemaResolver) -> Result<Value, MockError> {
        if let Some(example) = mock.example() {
            tracing::debug!("mocking from inline example");
            return Ok(example.clone());
        }

        if let Some(examples) = mock.examples() {
            let chosen = examples.get(name).or_else(|| examples.values().next());
            if let Some(example) = chosen {
                tracing::debug!(name, "mocking from named examples");
                return Ok(example.to_value());
            }
        }

        let schema = match mock.schema() {
            Some(SchemaSource::Direct(schema)) => schema,
            Some(SchemaSource::Holder(SchemaRef::Inline(schema))) => &**schema,
            Some(SchemaSource::Holder(SchemaRef::Reference { reference })) => resolver
                .resolve(reference)
                .ok_or_else(|| MockError::UnresolvedReference(reference.clone()))?,
            None => return Err(MockError::NotMockable),
        };
        tracing::debug!("mocking from schema");
        self.renderer
            .render_schema(schema, resolver)
            .ok_or(MockError::Unsatisfiable)
    }

    /// Produce the mock and encode it.
    pub fn generate_mock(&self, mock: &dyn Mockable, name: &str, resolver: &dyn SchemaResolver) -> Result<Vec<u8>, MockError> {
        let value = self.mock_value(mock, name, resolver)?;
        self.encode(&value)
    }

    /// Scalars are written as their plain text; containers and null go
    /// through the configured encoding.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, MockError> {
        match value {
            Value::String(s) => return Ok(s.clone().into_bytes()),
            Value::Number(n) => return Ok(n.to_string().into_bytes()),
            Value::Bool(b) => return Ok(b.to_string().into_bytes()),
            Value::Null | Value::Array(_) | Value::Object(_) => {}
        }
        match (self.encoding, self.pretty) {
            (MockEncoding::Json, false) => Ok(serde_json::to_vec(value)?),
            (MockEncoding::Json, true) => Ok(serde_json::to_vec_pretty(value)?),
            (MockEncoding::Yaml, _) => Ok(serde_yaml::to_string(value)?.into_bytes()),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

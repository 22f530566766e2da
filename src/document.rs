//! Minimal document model: just enough to resolve `$ref`s into schema nodes
//! and pick nodes out of a JSON or YAML document by JSON Pointer.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::mock::MediaType;
use crate::path_de;
use crate::schema::Schema;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },

    #[error("no node at JSON pointer `{0}`")]
    MissingPointer(String),
}

/// Turns a `$ref` string into the schema node it names.
pub trait SchemaResolver {
    fn resolve(&self, reference: &str) -> Option<&Schema>;
}

/// Where named definitions live inside a document.
const DEFINITION_SECTIONS: &[(&str, &str)] = &[
    ("/components/schemas", "#/components/schemas/"),
    ("/$defs", "#/$defs/"),
    ("/definitions", "#/definitions/"),
];

// ————————————————————————————————————————————————————————————————————————————
// COMPONENTS
// ————————————————————————————————————————————————————————————————————————————

/// Registry of reusable definitions keyed by reference path.
#[derive(Debug, Clone, Default)]
pub struct Components {
    schemas: IndexMap<String, Schema>,
}

impl Components {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gather every named definition from `components/schemas`, `$defs` and
    /// `definitions`.
    pub fn from_document(root: &Value) -> Result<Self, DocumentError> {
        let mut out = Self::empty();
        for (pointer, prefix) in DEFINITION_SECTIONS {
            let Some(section) = root.pointer(pointer).and_then(Value::as_object) else {
                continue;
            };
            for (name, node) in section {
                let origin = format!("{pointer}/{}", escape_pointer_token(name));
                let schema = path_de::from_value_with_path::<Schema>(node, &origin)?;
                out.insert(format!("{prefix}{name}"), schema);
            }
        }
        Ok(out)
    }

    /// Register `schema` under `reference`, stamping its identity.
    pub fn insert(&mut self, reference: impl Into<String>, mut schema: Schema) {
        let reference = reference.into();
        schema.reference_identity = Some(reference.clone());
        self.schemas.insert(reference, schema);
    }

    /// Look up a definition by bare name in any definition section.
    pub fn by_name(&self, name: &str) -> Option<&Schema> {
        DEFINITION_SECTIONS
            .iter()
            .find_map(|(_, prefix)| self.schemas.get(&format!("{prefix}{name}")))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaResolver for Components {
    fn resolve(&self, reference: &str) -> Option<&Schema> {
        self.schemas.get(reference)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT
// ————————————————————————————————————————————————————————————————————————————

pub struct Document {
    root: Value,
    components: Components,
}

impl Document {
    /// Load a document; `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&source)
        } else {
            Self::from_json_str(&source)
        }
    }

    pub fn from_json_str(src: &str) -> Result<Self, DocumentError> {
        Self::from_value(path_de::from_json_str_with_path(src)?)
    }

    pub fn from_yaml_str(src: &str) -> Result<Self, DocumentError> {
        Self::from_value(path_de::from_yaml_str_with_path(src)?)
    }

    pub fn from_value(root: Value) -> Result<Self, DocumentError> {
        let components = Components::from_document(&root)?;
        Ok(Self { root, components })
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn node(&self, pointer: &str) -> Result<&Value, DocumentError> {
        self.root
            .pointer(pointer)
            .ok_or_else(|| DocumentError::MissingPointer(pointer.to_string()))
    }

    /// Decode the node at `pointer` as a schema. An empty pointer selects the root.
    pub fn schema_at(&self, pointer: &str) -> Result<Schema, DocumentError> {
        path_de::from_value_with_path(self.node(pointer)?, pointer)
    }

    /// Decode the node at `pointer` as something carrying example/examples/schema.
    pub fn media_type_at(&self, pointer: &str) -> Result<MediaType, DocumentError> {
        path_de::from_value_with_path(self.node(pointer)?, pointer)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

// ------------------------------- Tests ------------------------------------ //

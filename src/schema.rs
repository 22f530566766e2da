//! Strongly-typed schema nodes. The renderer matches on populated fields,
//! never on raw `serde_json::Value` shapes.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    Bigint,                  // custom numeric tag, rendered as a wide integer
    Decimal,                 // custom numeric tag, rendered as a float
    #[serde(other)]
    Unknown,                 // tolerated, never rendered
}

/// A child position: either an inline schema or a named reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Inline(Box<Schema>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, deserialize_with = "one_or_many")]
    pub types: Vec<SchemaType>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_items: Option<u64>,
    #[serde(rename = "enum", default)]
    pub enum_: Vec<Value>,
    /// `Some(Value::Null)` when the document spells out `example: null`.
    #[serde(default, deserialize_with = "present_value")]
    pub example: Option<Value>,
    #[serde(default)]
    pub examples: Vec<Value>,
    #[serde(default)]
    pub properties: IndexMap<String, SchemaRef>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub all_of: Vec<SchemaRef>,
    #[serde(default)]
    pub one_of: Vec<SchemaRef>,
    #[serde(default)]
    pub any_of: Vec<SchemaRef>,
    #[serde(default)]
    pub dependent_schemas: IndexMap<String, SchemaRef>,
    pub items: Option<Box<SchemaRef>>,

    /// Reference path of the reusable definition this node was registered as.
    /// Stamped by the resolver; absent for inline nodes.
    #[serde(skip)]
    pub reference_identity: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Schema {
    pub fn has_type(&self, ty: SchemaType) -> bool {
        self.types.contains(&ty)
    }

    /// Object-composition handling wins over any declared `type` whenever one
    /// of these keywords is populated.
    pub fn is_composite(&self) -> bool {
        !self.properties.is_empty()
            || !self.all_of.is_empty()
            || !self.dependent_schemas.is_empty()
            || !self.one_of.is_empty()
            || !self.any_of.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        self.types.iter().any(|t| matches!(
            t,
            SchemaType::Number | SchemaType::Integer | SchemaType::Bigint | SchemaType::Decimal
        ))
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl SchemaRef {
    pub fn inline(schema: Schema) -> Self {
        Self::Inline(Box::new(schema))
    }

    pub fn reference(reference: impl Into<String>) -> Self {
        Self::Reference { reference: reference.into() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn one_or_many<'de, D>(de: D) -> Result<Vec<SchemaType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(SchemaType),
        Many(Vec<SchemaType>),
    }

    Ok(match Option::<OneOrMany>::deserialize(de)? {
        None => Vec::new(),
        Some(OneOrMany::One(t)) => vec![t],
        Some(OneOrMany::Many(ts)) => ts,
    })
}

/// Keeps an explicit `null` apart from an absent key; pair with `default`.
pub(crate) fn present_value<'de, D>(de: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(Some)
}

// ------------------------------- Tests ------------------------------------ //

use rand::seq::SliceRandom;
use serde_json::Value;

use super::Dive;
use crate::schema::{Schema, SchemaType};
use crate::supplier::{self, DEFAULT_MAXIMUM, DEFAULT_MINIMUM};

impl Dive<'_> {
    /// enum > first example > format. Default format is a bounded integer.
    pub(super) fn render_number(&mut self, schema: &Schema) -> Value {
        if let Some(choice) = schema.enum_.choose(&mut self.rng) {
            return choice.clone();
        }
        if let Some(first) = schema.examples.first() {
            return first.clone();
        }
        let (min, max) = numeric_bounds(schema);
        match effective_format(schema) {
            Some("float") => Value::from(supplier::random_f32(&mut self.rng)),
            Some("double") => Value::from(supplier::random_f64(&mut self.rng)),
            Some("int32") => Value::from(supplier::random_int(&mut self.rng, min, max) as i32),
            Some("bigint") => Value::from(supplier::random_wide_int(&mut self.rng)),
            Some("decimal") => Value::from(supplier::random_f64(&mut self.rng)),
            _ => Value::from(supplier::random_int(&mut self.rng, min, max)),
        }
    }
}

/// The custom `bigint`/`decimal` type tags act as their namesake format when
/// no explicit format is given.
fn effective_format(schema: &Schema) -> Option<&str> {
    if let Some(format) = schema.format.as_deref() {
        return Some(format);
    }
    if schema.has_type(SchemaType::Bigint) {
        Some("bigint")
    } else if schema.has_type(SchemaType::Decimal) {
        Some("decimal")
    } else {
        None
    }
}

fn numeric_bounds(schema: &Schema) -> (i64, i64) {
    let min = schema.minimum.map_or(DEFAULT_MINIMUM, |m| m.ceil() as i64);
    let max = schema.maximum.map_or(DEFAULT_MAXIMUM, |m| m.ceil() as i64);
    (min, max)
}

// ------------------------------- Tests ------------------------------------ //

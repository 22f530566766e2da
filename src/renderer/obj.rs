use serde_json::{Map, Value};

use super::{ALL_OF_KEY, ANY_OF_KEY, DEPENDENT_SCHEMAS_KEY, Dive, ONE_OF_KEY, Rendered, Unsatisfiable, Visited};
use crate::schema::{Schema, SchemaRef};

impl<'a> Dive<'a> {
    /// Properties, then all-of, dependent schemas, one-of and any-of, all
    /// merged into one mapping.
    pub(super) fn render_object(
        &mut self,
        schema: &'a Schema,
        identity: Option<&'a str>,
        key: &str,
        visited: &Visited<'a>,
        depth: usize,
    ) -> Rendered {
        let mut scoped = visited.clone();
        if let Some(id) = identity {
            if !scoped.insert(id) {
                tracing::trace!(key, reference = id, "circular reference, cutting branch");
                return Err(Unsatisfiable);
            }
        }

        let mut out = Map::new();
        self.render_properties(schema, &scoped, depth, &mut out)?;
        self.render_all_of(&schema.all_of, &scoped, depth, &mut out)?;
        self.render_dependent_schemas(schema, &scoped, depth, &mut out)?;
        self.render_first_of(&schema.one_of, ONE_OF_KEY, &scoped, depth, &mut out)?;
        self.render_first_of(&schema.any_of, ANY_OF_KEY, &scoped, depth, &mut out)?;
        Ok(Some(Value::Object(out)))
    }

    fn render_properties(
        &mut self,
        schema: &'a Schema,
        visited: &Visited<'a>,
        depth: usize,
        out: &mut Map<String, Value>,
    ) -> Result<(), Unsatisfiable> {
        let required_only = !self.renderer.required_check_disabled() && !schema.required.is_empty();

        for (name, child) in &schema.properties {
            let required = schema.is_required(name);
            if required_only && !required {
                continue;
            }
            match self.render_ref(child, name, visited, depth + 1) {
                Ok(Some(value)) => {
                    out.insert(name.clone(), value);
                }
                Ok(None) => {}
                Err(Unsatisfiable) if required => return Err(Unsatisfiable),
                Err(Unsatisfiable) => {
                    tracing::trace!(property = %name, "dropping optional property");
                }
            }
        }

        // required but never declared: nothing constrains it
        for name in &schema.required {
            if !schema.properties.contains_key(name) {
                out.insert(name.clone(), Value::Object(Map::new()));
            }
        }
        Ok(())
    }

    fn render_all_of(
        &mut self,
        branches: &'a [SchemaRef],
        visited: &Visited<'a>,
        depth: usize,
        out: &mut Map<String, Value>,
    ) -> Result<(), Unsatisfiable> {
        for branch in branches {
            let value = self.render_ref(branch, ALL_OF_KEY, visited, depth + 1)?;
            merge_into(out, ALL_OF_KEY, value);
        }
        Ok(())
    }

    /// Applied only for properties already present in `out`.
    fn render_dependent_schemas(
        &mut self,
        schema: &'a Schema,
        visited: &Visited<'a>,
        depth: usize,
        out: &mut Map<String, Value>,
    ) -> Result<(), Unsatisfiable> {
        for (name, dependent) in &schema.dependent_schemas {
            if !out.contains_key(name) {
                continue;
            }
            let value = self.render_ref(dependent, DEPENDENT_SCHEMAS_KEY, visited, depth + 1)?;
            merge_into(out, DEPENDENT_SCHEMAS_KEY, value);
        }
        Ok(())
    }

    /// First alternative that renders wins; later ones are never tried.
    fn render_first_of(
        &mut self,
        alternatives: &'a [SchemaRef],
        keyword: &str,
        visited: &Visited<'a>,
        depth: usize,
        out: &mut Map<String, Value>,
    ) -> Result<(), Unsatisfiable> {
        if alternatives.is_empty() {
            return Ok(());
        }
        for alternative in alternatives {
            if let Ok(value) = self.render_ref(alternative, keyword, visited, depth + 1) {
                merge_into(out, keyword, value);
                return Ok(());
            }
        }
        tracing::trace!(keyword, "no alternative can be rendered");
        Err(Unsatisfiable)
    }
}

/// Mappings merge key by key; anything else is kept whole under `keyword`.
fn merge_into(out: &mut Map<String, Value>, keyword: &str, value: Option<Value>) {
    match value {
        Some(Value::Object(entries)) => out.extend(entries),
        Some(other) => {
            out.insert(keyword.to_string(), other);
        }
        None => {}
    }
}

// ------------------------------- Tests ------------------------------------ //

use serde_json::Value;

use super::str::yields_plural_examples;
use super::{Dive, ITEMS_KEY, MAX_ITEMS, Rendered, Unsatisfiable, Visited};
use crate::schema::Schema;

impl<'a> Dive<'a> {
    /// `minItems` (default 1, at most [`MAX_ITEMS`]) independent renders of
    /// `items`. One failing element collapses the whole array to `[]`.
    pub(super) fn render_array(
        &mut self,
        schema: &'a Schema,
        key: &str,
        visited: &Visited<'a>,
        depth: usize,
    ) -> Rendered {
        let Some(items) = schema.items.as_deref() else {
            return Ok(None);
        };
        let plural = self.resolve(items).is_some_and(|(item, _)| yields_plural_examples(item));
        let requested = schema.min_items.unwrap_or(1);
        let count = requested.min(MAX_ITEMS);
        if count < requested {
            tracing::warn!(key, requested, rendered = count, "minItems above the item ceiling, truncating");
        }

        let mut rendered = Vec::new();
        for _ in 0..count {
            match self.render_ref(items, ITEMS_KEY, visited, depth + 1) {
                // the item's examples are the whole array
                Ok(Some(value @ Value::Array(_))) if plural => return Ok(Some(value)),
                Ok(Some(value)) => rendered.push(value),
                Ok(None) => {}
                Err(Unsatisfiable) => {
                    tracing::trace!(key, "array element cannot be rendered, collapsing to empty");
                    return Ok(Some(Value::Array(Vec::new())));
                }
            }
        }
        Ok(Some(Value::Array(rendered)))
    }
}

// ------------------------------- Tests ------------------------------------ //

//! Schema Renderer: walk a schema graph (possibly cyclic through `$ref`s)
//! and materialize one plausible value.
//!
//! Priority per node:
//! 1. a literal `example` is returned verbatim, before any other check;
//! 2. past [`MAX_DEPTH`] a placeholder string is returned (always a success);
//! 3. object composition (`properties`, `allOf`, `dependentSchemas`, `oneOf`,
//!    `anyOf`) beats any declared `type`;
//! 4. then string, numeric, boolean, object, array by declared `type`.
//!
//! Failure is asymmetric. [`Unsatisfiable`] means a subtree can never be
//! finished (a reference cycle on a mandatory path): a required property,
//! an all-of branch, a dependent schema or every one-of/any-of alternative
//! failing fails the enclosing object, while an optional property failing is
//! simply left out.
//!
//! Cycle detection is per branch. Each object adds its reference identity to
//! a copy of the visited set it was handed, and children only ever see that
//! copy by shared reference, so siblings never observe each other's markers.
pub mod arr;
pub mod num;
pub mod obj;
pub mod str;

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use crate::document::SchemaResolver;
use crate::schema::{Schema, SchemaRef, SchemaType};
use crate::supplier::Dictionary;

// ------------------------------- Policy ---------------------------------- //

pub const MAX_DEPTH: usize = 100;
pub const TOO_DEEP: &str = "too deep to continue rendering...";
/// Upper bound on elements rendered for one array, whatever `minItems` asks.
pub const MAX_ITEMS: u64 = 10_000;

pub const ROOT_KEY: &str = "root";
pub const ITEMS_KEY: &str = "items";
pub const ALL_OF_KEY: &str = "allOf";
pub const ONE_OF_KEY: &str = "oneOf";
pub const ANY_OF_KEY: &str = "anyOf";
pub const DEPENDENT_SCHEMAS_KEY: &str = "dependentSchemas";

// ------------------------------- Outcome --------------------------------- //

/// A subtree that cannot be satisfied. Carries nothing on purpose: the only
/// question a caller asks is "omit or propagate?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsatisfiable;

/// `Ok(None)` means the node declares nothing renderable; the parent leaves
/// the slot out.
pub type Rendered = Result<Option<Value>, Unsatisfiable>;

/// Reference identities entered on the current recursion path.
pub type Visited<'a> = BTreeSet<&'a str>;

// ------------------------------- Renderer -------------------------------- //

#[derive(Debug, Clone, Default)]
pub struct SchemaRenderer {
    dictionary: Arc<Dictionary>,
    disable_required: bool,
    seed: Option<u64>,
}

impl SchemaRenderer {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary: Arc::new(dictionary), ..Self::default() }
    }

    /// Render every declared property instead of only the required ones.
    pub fn disable_required_check(mut self) -> Self {
        self.disable_required = true;
        self
    }

    /// Seed the random source; every render then starts from the same state.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn required_check_disabled(&self) -> bool {
        self.disable_required
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Render a whole schema. `None` when the schema can never be satisfied.
    ///
    /// The root is entered without an identity even when it is a named
    /// definition: only a followed `$ref` marks the visited set, so a
    /// self-reference renders once before the cycle is cut.
    pub fn render_schema(&self, schema: &Schema, resolver: &dyn SchemaResolver) -> Option<Value> {
        match self.dive(resolver).render(schema, None, ROOT_KEY, &Visited::new(), 0) {
            Ok(value) => Some(value.unwrap_or(Value::Null)),
            Err(Unsatisfiable) => {
                tracing::debug!("schema cannot be rendered");
                None
            }
        }
    }

    /// Start a single render walk with its own random source.
    pub fn dive<'a>(&'a self, resolver: &'a dyn SchemaResolver) -> Dive<'a> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Dive { renderer: self, resolver, rng }
    }
}

/// One top-level render. Owns its RNG, so independent dives share nothing
/// mutable and may run in parallel.
pub struct Dive<'a> {
    renderer: &'a SchemaRenderer,
    resolver: &'a dyn SchemaResolver,
    rng: StdRng,
}

impl<'a> Dive<'a> {
    /// Render `schema` into the slot named `key`. `identity` is the reusable
    /// definition the node was reached through, if any.
    pub fn render(
        &mut self,
        schema: &'a Schema,
        identity: Option<&'a str>,
        key: &str,
        visited: &Visited<'a>,
        depth: usize,
    ) -> Rendered {
        if let Some(example) = &schema.example {
            return Ok(Some(example.clone()));
        }
        if depth > MAX_DEPTH {
            tracing::trace!(key, depth, "depth ceiling reached");
            return Ok(Some(Value::String(TOO_DEEP.to_string())));
        }
        if schema.is_composite() {
            return self.render_object(schema, identity, key, visited, depth);
        }
        if schema.has_type(SchemaType::String) {
            return Ok(Some(self.render_string(schema, key)));
        }
        if schema.is_numeric() {
            return Ok(Some(self.render_number(schema)));
        }
        if schema.has_type(SchemaType::Boolean) {
            return Ok(Some(Value::Bool(true)));
        }
        if schema.has_type(SchemaType::Object) {
            return self.render_object(schema, identity, key, visited, depth);
        }
        if schema.has_type(SchemaType::Array) {
            return self.render_array(schema, key, visited, depth);
        }
        Ok(None)
    }

    /// Render a child position, following `$ref`s through the resolver.
    pub fn render_ref(&mut self, child: &'a SchemaRef, key: &str, visited: &Visited<'a>, depth: usize) -> Rendered {
        match self.resolve(child) {
            Some((schema, identity)) => self.render(schema, identity, key, visited, depth),
            None => Err(Unsatisfiable),
        }
    }

    fn resolve(&self, child: &'a SchemaRef) -> Option<(&'a Schema, Option<&'a str>)> {
        match child {
            SchemaRef::Inline(schema) => Some((&**schema, schema.reference_identity.as_deref())),
            SchemaRef::Reference { reference } => {
                let resolver = self.resolver;
                match resolver.resolve(reference) {
                    Some(schema) => {
                        let identity = schema.reference_identity.as_deref().unwrap_or(reference);
                        Some((schema, Some(identity)))
                    }
                    None => {
                        tracing::warn!(reference = %reference, "unresolved reference");
                        None
                    }
                }
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

use rand::seq::SliceRandom;
use serde_json::Value;

use super::{Dive, ITEMS_KEY};
use crate::schema::{Schema, SchemaType};
use crate::supplier::{self, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, PatternGenerator};

/// Redraws allowed for a pattern sample longer than `maxLength`.
const MAX_PATTERN_ATTEMPTS: usize = 100;

impl Dive<'_> {
    /// enum > examples > format > pattern > bounded word.
    pub(super) fn render_string(&mut self, schema: &Schema, key: &str) -> Value {
        if let Some(choice) = schema.enum_.choose(&mut self.rng) {
            return choice.clone();
        }
        if let Some(first) = schema.examples.first() {
            if key == ITEMS_KEY && schema.examples.len() > 1 {
                return Value::Array(schema.examples.clone());
            }
            return Value::String(stringify(first));
        }
        if let Some(format) = schema.format.as_deref() {
            if let Some(value) = self.render_string_format(format) {
                return Value::String(value);
            }
        }
        let (min, max) = length_bounds(schema);
        if let Some(pattern) = schema.pattern.as_deref() {
            let max_repeat = u32::try_from(max).unwrap_or(u32::MAX);
            match PatternGenerator::compile(pattern, max_repeat) {
                Ok(generator) => {
                    return Value::String(generator.sample_within(&mut self.rng, max, MAX_PATTERN_ATTEMPTS));
                }
                Err(error) => tracing::warn!(pattern, %error, "pattern cannot be generated, falling back to a word"),
            }
        }
        Value::String(self.word(min, max))
    }

    /// Fixed table of format generators. `None` for formats we don't know.
    fn render_string_format(&mut self, format: &str) -> Option<String> {
        let value = match format {
            "date-time" => supplier::date_time_now(),
            "date" => supplier::date_now(),
            "time" => supplier::time_now(),
            "email" => format!("{}@{}.com", self.default_word(), self.default_word()),
            "hostname" => format!("{}.com", self.default_word()),
            "ipv4" => supplier::ipv4(&mut self.rng),
            "ipv6" => supplier::ipv6(&mut self.rng),
            "uri" => format!(
                "https://{}-{}-{}.com/{}",
                self.default_word(),
                self.default_word(),
                self.default_word(),
                self.default_word()
            ),
            "uri-reference" => format!("/{}/{}", self.default_word(), self.default_word()),
            "uuid" => supplier::pseudo_uuid(),
            "byte" | "password" => self.default_word(),
            "binary" => {
                let word = self.default_word();
                supplier::base64(&word)
            }
            "bigint" => supplier::random_wide_int(&mut self.rng).to_string(),
            "decimal" => supplier::random_f64(&mut self.rng).to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub(super) fn word(&mut self, min: usize, max: usize) -> String {
        let dictionary = self.renderer.dictionary();
        dictionary.random_word(&mut self.rng, min, max)
    }

    fn default_word(&mut self) -> String {
        self.word(DEFAULT_MIN_LENGTH, DEFAULT_MAX_LENGTH)
    }
}

/// True when an array of this item schema is replaced by the item's examples.
pub(super) fn yields_plural_examples(schema: &Schema) -> bool {
    schema.example.is_none()
        && !schema.is_composite()
        && schema.has_type(SchemaType::String)
        && schema.enum_.is_empty()
        && schema.examples.len() > 1
}

fn length_bounds(schema: &Schema) -> (usize, usize) {
    let min = schema.min_length.map_or(DEFAULT_MIN_LENGTH, |n| n as usize);
    let max = schema.max_length.map_or(DEFAULT_MAX_LENGTH, |n| n as usize);
    (min, max.max(min))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Components;
    use crate::renderer::tests::{render, schema};
    use crate::renderer::{ROOT_KEY, SchemaRenderer, Visited};
    use crate::supplier::Dictionary;
    use serde_json::json;

    fn render_str(v: Value) -> String {
        match render(v) {
            Some(Value::String(s)) => s,
            other => panic!("expected a string, got {other:?}"),
        }
    }

    #[test]
    fn enum_members_only() {
        for _ in 0..20 {
            let out = render(json!({"type": "string", "enum": ["a", "b", "c"], "format": "uuid"})).unwrap();
            assert!(["a", "b", "c"].contains(&out.as_str().unwrap()), "{out}");
        }
    }

    #[test]
    fn length_bounds_hold_for_plain_words() {
        let renderer = SchemaRenderer::new(Dictionary::from_words(["ox", "cow", "goat", "horse", "donkey", "elephant"]));
        let components = Components::empty();
        let node = schema(json!({"type": "string", "minLength": 4, "maxLength": 6}));
        for _ in 0..100 {
            let out = renderer.render_schema(&node, &components).unwrap();
            let len = out.as_str().unwrap().chars().count();
            assert!((4..=6).contains(&len), "{out}");
        }
    }

    #[test]
    fn first_example_is_stringified() {
        assert_eq!(render_str(json!({"type": "string", "examples": ["one", "two"]})), "one");
        assert_eq!(render_str(json!({"type": "string", "examples": [42]})), "42");
    }

    #[test]
    fn item_context_returns_every_example() {
        let renderer = SchemaRenderer::default();
        let components = Components::empty();
        let node = schema(json!({"type": "string", "examples": ["one", "two"]}));
        let out = renderer.dive(&components).render(&node, None, ITEMS_KEY, &Visited::new(), 1);
        assert_eq!(out, Ok(Some(json!(["one", "two"]))));

        let single = schema(json!({"type": "string", "examples": ["one"]}));
        let out = renderer.dive(&components).render(&single, None, ITEMS_KEY, &Visited::new(), 1);
        assert_eq!(out, Ok(Some(json!("one"))));

        let root = renderer.dive(&components).render(&node, None, ROOT_KEY, &Visited::new(), 0);
        assert_eq!(root, Ok(Some(json!("one"))));
    }

    #[test]
    fn format_table() {
        let email = regex::Regex::new(r"^[a-z]+@[a-z]+\.com$").unwrap();
        assert!(email.is_match(&render_str(json!({"type": "string", "format": "email"}))));

        let host = regex::Regex::new(r"^[a-z]+\.com$").unwrap();
        assert!(host.is_match(&render_str(json!({"type": "string", "format": "hostname"}))));

        let uri = regex::Regex::new(r"^https://[a-z]+-[a-z]+-[a-z]+\.com/[a-z]+$").unwrap();
        assert!(uri.is_match(&render_str(json!({"type": "string", "format": "uri"}))));

        let uri_ref = regex::Regex::new(r"^/[a-z]+/[a-z]+$").unwrap();
        assert!(uri_ref.is_match(&render_str(json!({"type": "string", "format": "uri-reference"}))));

        let uuid = regex::Regex::new(r"^[0-9a-f]{8}(-[0-9a-f]{4}){3}-[0-9a-f]{12}$").unwrap();
        assert!(uuid.is_match(&render_str(json!({"type": "string", "format": "uuid"}))));

        let v4 = render_str(json!({"type": "string", "format": "ipv4"}));
        assert!(v4.parse::<std::net::Ipv4Addr>().is_ok(), "{v4}");

        let v6 = render_str(json!({"type": "string", "format": "ipv6"}));
        assert!(v6.parse::<std::net::Ipv6Addr>().is_ok(), "{v6}");

        let ts = render_str(json!({"type": "string", "format": "date-time"}));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "{ts}");

        let date = render_str(json!({"type": "string", "format": "date"}));
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok(), "{date}");

        let time = render_str(json!({"type": "string", "format": "time"}));
        assert!(chrono::NaiveTime::parse_from_str(&time, "%H:%M:%S").is_ok(), "{time}");

        let bigint = render_str(json!({"type": "string", "format": "bigint"}));
        assert!(bigint.parse::<i64>().is_ok(), "{bigint}");

        let decimal = render_str(json!({"type": "string", "format": "decimal"}));
        assert!(decimal.parse::<f64>().is_ok(), "{decimal}");

        let binary = render_str(json!({"type": "string", "format": "binary"}));
        assert!(!binary.is_empty() && binary.len() % 4 == 0, "{binary}");

        let password = render_str(json!({"type": "string", "format": "password"}));
        assert!((3..=10).contains(&password.len()), "{password}");
    }

    #[test]
    fn pattern_applies_when_format_is_unknown() {
        let check = regex::Regex::new(r"^[A-Z]{2}[0-9]{3}$").unwrap();
        let out = render_str(json!({"type": "string", "format": "sku", "pattern": "^[A-Z]{2}[0-9]{3}$"}));
        assert!(check.is_match(&out), "{out}");
    }

    #[test]
    fn pattern_samples_respect_max_length_and_ascii_digits() {
        let node = schema(json!({"type": "string", "pattern": "^[a-z]+[0-9]+$", "maxLength": 5}));
        let renderer = SchemaRenderer::default();
        let components = Components::empty();
        for _ in 0..20 {
            let out = renderer.render_schema(&node, &components).unwrap();
            let len = out.as_str().unwrap().chars().count();
            assert!((2..=5).contains(&len), "{out}");
        }

        let zip = regex::Regex::new(r"^[0-9]{6}$").unwrap();
        let out = render_str(json!({"type": "string", "pattern": "^\\d{6}$"}));
        assert!(zip.is_match(&out), "{out:?}");
    }

    #[test]
    fn broken_pattern_falls_back_to_a_word() {
        let out = render_str(json!({"type": "string", "pattern": "([a-z"}));
        assert!((3..=10).contains(&out.len()), "{out}");
    }

    #[test]
    fn plural_examples_detection() {
        assert!(yields_plural_examples(&schema(json!({"type": "string", "examples": ["a", "b"]}))));
        assert!(!yields_plural_examples(&schema(json!({"type": "string", "examples": ["a"]}))));
        assert!(!yields_plural_examples(&schema(json!({"type": "string", "enum": ["x"], "examples": ["a", "b"]}))));
        assert!(!yields_plural_examples(&schema(json!({"type": "integer", "examples": [1, 2]}))));
    }
}

//! Pattern-driven string generation.
//!
//! Unbounded repetition (`*`, `+`, `{n,}`) adds at most `max_repeat` copies
//! past its minimum. The cap is per repetition, not on the whole sample:
//! `[a-z]+[0-9]+` with a cap of 5 can still reach 12 chars, so callers with a
//! total length budget draw again (see [`PatternGenerator::sample_within`]).
//!
//! Leading `^` and trailing `$` anchors are stripped before compiling since
//! every generated sample is a whole string anyway. Character classes
//! (`\d`, `\w`, `\s`, `.`, negated sets) are narrowed to printable ASCII,
//! the way ECMA-262 patterns read them. A class with no ASCII member keeps
//! its original range.
use rand::Rng;
use regex_syntax::hir::{Capture, Class, ClassUnicode, ClassUnicodeRange, Hir, HirKind, Repetition};

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    Syntax(#[from] regex_syntax::Error),

    #[error("pattern cannot be generated: {0}")]
    Generator(#[from] rand_regex::Error),
}

/// A compiled pattern, reusable across samples.
pub struct PatternGenerator {
    regex: rand_regex::Regex,
}

impl PatternGenerator {
    pub fn compile(pattern: &str, max_repeat: u32) -> Result<Self, PatternError> {
        let hir = regex_syntax::Parser::new().parse(strip_anchors(pattern))?;
        let regex = rand_regex::Regex::with_hir(narrow_to_ascii(hir), max_repeat)?;
        Ok(Self { regex })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> String {
        rng.sample::<String, _>(&self.regex)
    }

    /// Draw up to `attempts` samples and keep the first one of at most
    /// `max_chars` chars. Falls back to the last draw.
    pub fn sample_within<R: Rng>(&self, rng: &mut R, max_chars: usize, attempts: usize) -> String {
        let mut sample = self.sample(rng);
        for _ in 1..attempts {
            if sample.chars().count() <= max_chars {
                break;
            }
            sample = self.sample(rng);
        }
        sample
    }
}

/// One-shot compile and sample.
pub fn generate_matching<R: Rng>(rng: &mut R, pattern: &str, max_repeat: u32) -> Result<String, PatternError> {
    Ok(PatternGenerator::compile(pattern, max_repeat)?.sample(rng))
}

fn strip_anchors(pattern: &str) -> &str {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    match body.strip_suffix('$') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => body,
    }
}

fn narrow_to_ascii(hir: Hir) -> Hir {
    match hir.into_kind() {
        HirKind::Empty => Hir::empty(),
        HirKind::Literal(literal) => Hir::literal(literal.0),
        HirKind::Class(Class::Unicode(class)) => Hir::class(Class::Unicode(narrow_class(class))),
        HirKind::Class(class) => Hir::class(class),
        HirKind::Look(look) => Hir::look(look),
        HirKind::Repetition(repetition) => Hir::repetition(Repetition {
            sub: Box::new(narrow_to_ascii(*repetition.sub)),
            ..repetition
        }),
        HirKind::Capture(capture) => Hir::capture(Capture {
            sub: Box::new(narrow_to_ascii(*capture.sub)),
            ..capture
        }),
        HirKind::Concat(subs) => Hir::concat(subs.into_iter().map(narrow_to_ascii).collect()),
        HirKind::Alternation(subs) => Hir::alternation(subs.into_iter().map(narrow_to_ascii).collect()),
    }
}

fn narrow_class(class: ClassUnicode) -> ClassUnicode {
    let mut narrowed = class.clone();
    narrowed.intersect(&ClassUnicode::new([ClassUnicodeRange::new(' ', '~')]));
    if narrowed.ranges().is_empty() { class } else { narrowed }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn anchors_are_stripped_but_escaped_dollars_survive() {
        assert_eq!(strip_anchors("^[a-z]+$"), "[a-z]+");
        assert_eq!(strip_anchors("[a-z]+"), "[a-z]+");
        assert_eq!(strip_anchors(r"^cost\$"), r"cost\$");
    }

    #[test]
    fn samples_match_the_pattern() {
        let mut rng = StdRng::seed_from_u64(42);
        let check = regex::Regex::new(r"^[a-z]{3}-[0-9]{4}$").unwrap();
        for _ in 0..50 {
            let s = generate_matching(&mut rng, "^[a-z]{3}-[0-9]{4}$", 10).unwrap();
            assert!(check.is_match(&s), "{s}");
        }
    }

    #[test]
    fn perl_classes_and_dot_stay_ascii() {
        let mut rng = StdRng::seed_from_u64(7);
        let digits = regex::Regex::new(r"^[0-9]{6}$").unwrap();
        let words = regex::Regex::new(r"^[A-Za-z0-9_]{4}$").unwrap();
        for _ in 0..50 {
            let d = generate_matching(&mut rng, r"^\d{6}$", 10).unwrap();
            assert!(digits.is_match(&d), "{d:?}");

            let w = generate_matching(&mut rng, r"^\w{4}$", 10).unwrap();
            assert!(words.is_match(&w), "{w:?}");

            let any = generate_matching(&mut rng, r"^.{5}[^a-z]\s$", 10).unwrap();
            assert!(any.is_ascii(), "{any:?}");
            assert_eq!(any.chars().count(), 7, "{any:?}");
        }
    }

    #[test]
    fn non_ascii_sets_are_kept() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = generate_matching(&mut rng, "[é-ë]{3}", 10).unwrap();
        assert!(s.chars().all(|c| ('é'..='ë').contains(&c)), "{s:?}");
    }

    #[test]
    fn unbounded_repeats_are_capped() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let s = generate_matching(&mut rng, "x+", 5).unwrap();
            assert!((1..=6).contains(&s.len()), "{s}");
        }
    }

    #[test]
    fn sample_within_redraws_to_respect_a_total_budget() {
        let mut rng = StdRng::seed_from_u64(3);
        let generator = PatternGenerator::compile("^[a-z]+[0-9]+$", 5).unwrap();
        for _ in 0..20 {
            let s = generator.sample_within(&mut rng, 5, 100);
            assert!((2..=5).contains(&s.chars().count()), "{s}");
        }
    }

    #[test]
    fn malformed_patterns_are_reported() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(generate_matching(&mut rng, "([a-z]", 5), Err(PatternError::Syntax(_))));
    }
}

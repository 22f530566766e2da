//! Value Supplier: stateless scalar generators used by the renderer.
//!
//! Every helper takes the caller's RNG, so a seeded renderer stays
//! reproducible. The one exception is [`pseudo_uuid`], which always draws
//! from the operating system's CSPRNG.
pub mod pattern;
pub mod words;

use base64::Engine as _;
use chrono::{SecondsFormat, Utc};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

pub use pattern::{PatternError, PatternGenerator, generate_matching};
pub use words::{DEFAULT_DICTIONARY_PATH, Dictionary};

// ------------------------------- Policy ---------------------------------- //

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_LENGTH: usize = 10;
pub const DEFAULT_MINIMUM: i64 = 1;
pub const DEFAULT_MAXIMUM: i64 = 100;

// ------------------------------- Numbers --------------------------------- //

/// Random integer in `min..max` (upper bound exclusive). An empty range
/// yields `min`.
pub fn random_int<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Non-negative 64-bit integer.
pub fn random_wide_int<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(0..i64::MAX)
}

/// Float in `[0, 1)`.
pub fn random_f64<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Float in `[0, 1)`, single precision.
pub fn random_f32<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(0.0f32..1.0)
}

// ------------------------------- Formats --------------------------------- //

/// 16 random bytes grouped 4-2-2-2-6 as lower-case hex. Version and variant
/// bits are left untouched, so this is not an RFC 4122 UUID.
pub fn pseudo_uuid() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    uuid::Uuid::from_bytes(bytes).hyphenated().to_string()
}

pub fn ipv4<R: Rng>(rng: &mut R) -> String {
    let [a, b, c, d]: [u8; 4] = rng.r#gen();
    format!("{a}.{b}.{c}.{d}")
}

pub fn ipv6<R: Rng>(rng: &mut R) -> String {
    let groups: [u16; 8] = rng.r#gen();
    groups
        .iter()
        .map(|g| format!("{g:x}"))
        .collect::<Vec<_>>()
        .join(":")
}

pub fn date_time_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn date_now() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub fn time_now() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}

pub fn base64(raw: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(raw)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ints_stay_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let n = random_int(&mut rng, 10, 20);
            assert!((10..20).contains(&n), "{n}");
        }
        assert_eq!(random_int(&mut rng, 5, 5), 5);
        assert_eq!(random_int(&mut rng, 9, 3), 9);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!((0.0..1.0).contains(&random_f64(&mut rng)));
            assert!((0.0..1.0).contains(&random_f32(&mut rng)));
            assert!(random_wide_int(&mut rng) >= 0);
        }
    }

    #[test]
    fn pseudo_uuid_is_grouped_lower_hex() {
        let check = regex::Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap();
        let a = pseudo_uuid();
        let b = pseudo_uuid();
        assert!(check.is_match(&a), "{a}");
        assert_ne!(a, b);
    }

    #[test]
    fn network_addresses_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(3);
        let v4 = ipv4(&mut rng);
        assert!(v4.parse::<std::net::Ipv4Addr>().is_ok(), "{v4}");
        let v6 = ipv6(&mut rng);
        assert_eq!(v6.split(':').count(), 8);
        assert!(v6.parse::<std::net::Ipv6Addr>().is_ok(), "{v6}");
    }

    #[test]
    fn clock_formats() {
        assert!(chrono::DateTime::parse_from_rfc3339(&date_time_now()).is_ok());
        assert!(chrono::NaiveDate::parse_from_str(&date_now(), "%Y-%m-%d").is_ok());
        assert!(chrono::NaiveTime::parse_from_str(&time_now(), "%H:%M:%S").is_ok());
    }

    #[test]
    fn base64_of_word() {
        assert_eq!(base64("pb33f"), "cGIzM2Y=");
    }
}

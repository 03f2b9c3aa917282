//! Feature normalization: raw survey age ranges to numeric ages and
//! generation buckets.
//!
//! Both functions are total. `normalize_age` signals unusable input with
//! `None` rather than an error; `map_generation` maps the absent case to
//! [`Generation::Unknown`].

use std::sync::LazyLock;

use regex::Regex;

use crate::core::profile::Generation;

// Accepted forms: "<low>-<high>" and "<n>+", whitespace-tolerant.
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*-\s*(\d+)$").unwrap());
static OPEN_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*\+$").unwrap());

/// Convert a raw age-range string into a numeric age.
///
/// * `"25-34"` yields the arithmetic mean, `29.5`.
/// * `"55+"` yields the lower bound, `55.0`.
/// * Anything else yields `None`; callers must handle the absent case.
pub fn normalize_age(raw: &str) -> Option<f64> {
    let raw = raw.trim();

    if let Some(caps) = RANGE_RE.captures(raw) {
        let low: f64 = caps[1].parse().ok()?;
        let high: f64 = caps[2].parse().ok()?;
        return Some((low + high) / 2.0);
    }

    if let Some(caps) = OPEN_END_RE.captures(raw) {
        return caps[1].parse().ok();
    }

    None
}

/// Bucket a numeric age into a generation.
///
/// Upper bounds are inclusive; ties resolve to the lower bucket (25 is still
/// Gen Z, 40 still Millennial, 55 still Gen X).
pub fn map_generation(age: Option<f64>) -> Generation {
    let Some(age) = age else {
        return Generation::Unknown;
    };

    if age <= 25.0 {
        Generation::GenZ
    } else if age <= 40.0 {
        Generation::Millennial
    } else if age <= 55.0 {
        Generation::GenX
    } else {
        Generation::Boomer
    }
}

/// Full pipeline from the raw survey string to a generation bucket.
pub fn generation_for_range(raw: &str) -> Generation {
    map_generation(normalize_age(raw))
}

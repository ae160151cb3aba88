//! Familiarity score rules.
//!
//! Familiarity is an integer in `[MIN_FAMILIARITY, MAX_FAMILIARITY]`.
//! Malformed input never fails: it becomes [`DEFAULT_FAMILIARITY`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lowest familiarity score.
pub const MIN_FAMILIARITY: u32 = 1;

/// Highest familiarity score.
pub const MAX_FAMILIARITY: u32 = 5;

/// Familiarity used when input is missing or unusable.
pub const DEFAULT_FAMILIARITY: u32 = 1;

/// Clamps any integer into the familiarity range.
#[must_use]
pub fn clamp(value: i64) -> u32 {
    // Bounded by MIN..=MAX, so the narrowing cast cannot truncate.
    value.clamp(i64::from(MIN_FAMILIARITY), i64::from(MAX_FAMILIARITY)) as u32
}

/// Parses a familiarity literal leniently.
///
/// Only a non-negative integer literal (ASCII digits, surrounding
/// whitespace ignored) is accepted; anything else yields
/// [`DEFAULT_FAMILIARITY`]. No range clamping happens here. Literals too
/// large for `u32` saturate.
#[must_use]
pub fn parse_literal(input: &str) -> u32 {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_FAMILIARITY;
    }
    input
        .parse::<u64>()
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(u32::MAX)
}

pub(crate) fn default_familiarity() -> u32 {
    DEFAULT_FAMILIARITY
}

/// Reads a familiarity value from the record file.
///
/// Accepts integers, floats (truncated), numeric strings, and null, and
/// clamps the result into range.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let value = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map_or(DEFAULT_FAMILIARITY, clamp),
        Value::String(s) => clamp(i64::from(parse_literal(&s))),
        _ => DEFAULT_FAMILIARITY,
    };
    Ok(value)
}

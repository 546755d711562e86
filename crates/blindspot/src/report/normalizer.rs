use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Value substituted for unknown, unparsable or out-of-range scale scores.
pub const NEUTRAL_SCORE: f64 = 50.0;
pub const SCORE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Survey payload as delivered by the result store.
///
/// The shape is decided here, at deserialization; anything that is neither a
/// sequence nor a string fails to deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScores {
    Values(Vec<RawScore>),
    Delimited(String),
}

impl RawScores {
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

impl From<Vec<f64>> for RawScores {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values.into_iter().map(RawScore::Number).collect())
    }
}

impl From<&str> for RawScores {
    fn from(value: &str) -> Self {
        Self::Delimited(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Number(f64),
    Text(String),
    /// Nulls, booleans and nested values; always neutral.
    Other(IgnoredAny),
}

impl RawScore {
    fn to_number(&self) -> Option<f64> {
        match self {
            RawScore::Number(value) => Some(*value),
            RawScore::Text(text) => parse_number(text),
            RawScore::Other(_) => None,
        }
    }
}

/// Bounded scores, one per catalog scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for ScoreVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Coerces a raw survey payload into exactly `catalog_len` scores in 0..=100.
///
/// Returns `None` when the element count differs from `catalog_len`. Elements
/// that are missing, non-numeric or out of range become [`NEUTRAL_SCORE`]
/// without signalling an error; fractional values are kept as-is.
pub fn normalize(raw: &RawScores, catalog_len: usize) -> Option<ScoreVector> {
    let candidates: Vec<Option<f64>> = match raw {
        RawScores::Values(values) => values.iter().map(RawScore::to_number).collect(),
        RawScores::Delimited(text) => text.split(',').map(parse_number).collect(),
    };

    if candidates.len() != catalog_len {
        return None;
    }

    Some(ScoreVector(candidates.into_iter().map(bounded).collect()))
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }
    trimmed.parse::<f64>().ok()
}

/// Unsigned `0x`, `0o` and `0b` integer literals; `None` when `text` has no
/// such prefix, `Some(None)` when the digits are invalid.
fn parse_prefixed_integer(text: &str) -> Option<Option<f64>> {
    let radix = match text.get(..2)?.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }
    Some(u64::from_str_radix(digits, radix).ok().map(|value| value as f64))
}

fn bounded(value: Option<f64>) -> f64 {
    match value {
        Some(score) if SCORE_RANGE.contains(&score) => score,
        _ => NEUTRAL_SCORE,
    }
}

#[cfg(test)]
pub(crate) fn parse_number_for_tests(text: &str) -> Option<f64> {
    parse_number(text)
}

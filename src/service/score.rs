//! Score normalization
//!
//! Models report scores as `8`, `"8/10"`, `"85"` (on a 0-100 scale) or junk.
//! Everything is coerced into a decimal in [0, 10]; failures read as neutral.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::SustainabilityScore;

/// Returned whenever a score cannot be parsed
pub const DEFAULT_SCORE: f64 = 5.0;

/// Normalize a JSON scalar into [0, 10]. Never fails.
pub fn normalize(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => finish(n.as_f64()),
        Value::String(s) => normalize_str(s),
        _ => DEFAULT_SCORE,
    }
}

/// Normalize a textual score into [0, 10]. Never fails.
pub fn normalize_str(raw: &str) -> f64 {
    finish(parse_leading_number(raw))
}

fn finish(parsed: Option<f64>) -> f64 {
    parsed
        .filter(|value| value.is_finite())
        .map(rescale_and_clamp)
        .unwrap_or(DEFAULT_SCORE)
}

/// Everything from the first `/` onward is dropped ("8/10" -> "8")
fn parse_leading_number(raw: &str) -> Option<f64> {
    let head = raw.split_once('/').map_or(raw, |(head, _)| head);
    head.trim().parse::<f64>().ok()
}

fn rescale_and_clamp(value: f64) -> f64 {
    // Values above 10 are taken to be on a 0-100 scale
    let value = if value > 10.0 { value / 10.0 } else { value };
    value.clamp(SustainabilityScore::MIN, SustainabilityScore::MAX)
}

impl<'de> Deserialize<'de> for SustainabilityScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(SustainabilityScore::new(normalize(&raw)))
    }
}

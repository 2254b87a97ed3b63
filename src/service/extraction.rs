//! Structured payload extraction from raw model replies
//!
//! The model is told to answer with bare JSON but often wraps it in a
//! markdown fence or surrounds it with prose. Two strategies are tried: a
//! fenced ```` ```json ```` block, then the span from the first `{` to the
//! last `}`. Braces inside string values are not balanced, so prose that
//! mentions a `}` after the payload makes the candidate malformed.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Key/value record parsed from a model reply
pub type StructuredPayload = Map<String, Value>;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap());

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    #[error("no structured content found in model reply")]
    NoStructuredContent,

    #[error("malformed JSON in model reply: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("model reply is JSON but not an object")]
    NotAnObject,

    #[error("model reply does not match the expected shape: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Extract the structured payload from a raw model reply
pub fn extract(raw: &str) -> Result<StructuredPayload, ExtractionError> {
    let candidate = candidate(raw).ok_or(ExtractionError::NoStructuredContent)?;

    match serde_json::from_str::<Value>(candidate).map_err(ExtractionError::Malformed)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractionError::NotAnObject),
    }
}

/// Extract and deserialize into `T`
pub fn extract_as<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractionError> {
    let payload = extract(raw)?;
    serde_json::from_value(Value::Object(payload)).map_err(ExtractionError::Schema)
}

fn candidate(raw: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(raw)
        && let Some(body) = captures.get(1)
    {
        return Some(body.as_str().trim());
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

//! Forgiving deserializers for fields coming back from the model
//!
//! The model is asked for JSON but routinely sends a string where a list was
//! requested, `"true"` instead of `true`, or "High risk" instead of "High".
//! These helpers coerce the common shapes and give up quietly on the rest.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::analysis::RiskLevel;

/// A list of strings. Accepts a bare string, scalars inside the list, or null.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    })
}

/// Optional free text. Numbers and booleans are stringified, empty text is absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value))
}

/// Optional risk level. Anything that does not read as a level is absent.
pub fn risk_level<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

/// Tag map with truthy coercion; a list of names marks each named tag true
pub(crate) fn flag_map(value: Value) -> BTreeMap<String, bool> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, flag)| (name, is_truthy(&flag)))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_to_string)
            .map(|name| (name, true))
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string_list")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "text")]
        note: Option<String>,
        #[serde(default, deserialize_with = "risk_level")]
        risk: Option<RiskLevel>,
    }

    #[test]
    fn test_string_list_shapes() {
        let probe: Probe = serde_json::from_value(json!({"items": ["a", 2, null, " "]})).unwrap();
        assert_eq!(probe.items, vec!["a", "2"]);

        let probe: Probe = serde_json::from_value(json!({"items": "single"})).unwrap();
        assert_eq!(probe.items, vec!["single"]);

        let probe: Probe = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(probe.items.is_empty());
    }

    #[test]
    fn test_text_and_risk() {
        let probe: Probe =
            serde_json::from_value(json!({"note": "", "risk": "Medium risk"})).unwrap();
        assert_eq!(probe.note, None);
        assert_eq!(probe.risk, Some(RiskLevel::Medium));

        let probe: Probe = serde_json::from_value(json!({"risk": "unknowable"})).unwrap();
        assert_eq!(probe.risk, None);
    }

    #[test]
    fn test_flag_map_coercion() {
        let flags = flag_map(json!({"Organic": "True", "Recyclable": "false", "Fair Trade": 1}));
        assert_eq!(flags.get("Organic"), Some(&true));
        assert_eq!(flags.get("Recyclable"), Some(&false));
        assert_eq!(flags.get("Fair Trade"), Some(&true));

        let flags = flag_map(json!(["Organic", "Plastic-Free"]));
        assert_eq!(flags.len(), 2);
        assert!(flag_map(json!("nonsense")).is_empty());
    }
}

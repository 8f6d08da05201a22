//! Compact JSON (de)serialization of claim maps.

use serde_json::{Map, Value};

/// Mapping from claim names to their values. Keys keep their insertion order.
pub type ClaimMap = Map<String, Value>;

/// Serializes claims to compact JSON, keeping keys in insertion order.
pub fn encode(claims: &ClaimMap) -> String {
    serde_json::to_string(claims).expect("serializing a JSON map cannot fail")
}

/// Parses claims from JSON text.
///
/// Empty input, malformed JSON and JSON values other than objects all produce
/// an empty map.
pub fn decode(text: &str) -> ClaimMap {
    if text.is_empty() {
        return ClaimMap::new();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            tracing::trace!(json.len = text.len(), "JSON text is not an object; using empty claims");
            ClaimMap::new()
        }
    }
}

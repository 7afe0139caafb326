//! Field-level serde helpers for tolerant wire parsing.
//!
//! One odd field must never sink a whole record, and one odd record must
//! never sink the whole list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Scalar JSON as text. Numbers and booleans are stringified; `null`,
/// arrays and objects have no text.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads an optional text field, treating `null`, missing and blank values as absent.
///
/// Non-string scalars are kept as their JSON text, so `"status": 2` becomes `"2"`.
pub fn non_blank<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = scalar_text(Value::deserialize(deserializer)?);
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(T::from))
}

/// Reads a required text field; `null` or a non-scalar value reads as `""`.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Reads a list, skipping entries that do not decode as `T`.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    let total = entries.len();
    let decoded: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("[Wire] Skipping unreadable list entry: {}", e);
                None
            }
        })
        .collect();
    if decoded.len() != total {
        tracing::debug!("[Wire] Kept {} of {} list entries", decoded.len(), total);
    }
    Ok(decoded)
}

//! Tolerant field decoders for success payloads
//!
//! A 2xx reply whose fields carry an unexpected value type must still render.
//! Each decoder here accepts any JSON value, keeps what it can, and logs a
//! warning for the rest. Only the top-level object shape is still enforced.

use crate::ordered::OrderedMap;
use crate::protocol::ProgramOutput;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Display text of a scalar; strings unquoted, numbers with every digit
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn strings(field: &str, key: &str, value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                if !item.is_string() {
                    tracing::warn!(field, key, value = %item, "non-string list element");
                }
                text_of(item)
            })
            .collect(),
        other => {
            tracing::warn!(field, key, value = %other, "expected a list; using the single value");
            vec![text_of(&other)]
        }
    }
}

fn object<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderedMap<Value>, D::Error> {
    Ok(Option::<OrderedMap<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `tokens`: category → list of lexemes
pub(crate) fn token_lists<'de, D>(deserializer: D) -> Result<OrderedMap<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(object(deserializer)?
        .into_iter()
        .map(|(category, value)| {
            let values = strings("tokens", &category, value);
            (category, values)
        })
        .collect())
}

/// `counts`: category → count; anything but a non-negative integer counts as 0
pub(crate) fn counts<'de, D>(deserializer: D) -> Result<OrderedMap<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(object(deserializer)?
        .into_iter()
        .map(|(category, value)| {
            let count = value.as_u64().unwrap_or_else(|| {
                tracing::warn!(category = %category, value = %value, "count is not an integer; using 0");
                0
            });
            (category, count)
        })
        .collect())
}

/// `total_tokens`; a non-integer is treated as absent
pub(crate) fn total<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => match other.as_u64() {
            Some(total) => Ok(Some(total)),
            None => {
                tracing::warn!(value = %other, "total_tokens is not an integer; ignored");
                Ok(None)
            }
        },
    }
}

/// `semantics`: list of diagnostics; a lone string is one diagnostic
pub(crate) fn diagnostics<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(strings("semantics", "", value)))
}

/// `output` of a source-language run: string or list, `null` meaning absent
pub(crate) fn program_output<'de, D>(deserializer: D) -> Result<Option<ProgramOutput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(ProgramOutput::Text(text)),
        items @ Value::Array(_) => Some(ProgramOutput::Lines(strings("output", "", items))),
        other => {
            tracing::warn!(value = %other, "unexpected output type; shown as text");
            Some(ProgramOutput::Text(text_of(&other)))
        }
    })
}

/// `output` of an assembly run
pub(crate) fn lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(strings("output", "", Value::deserialize(deserializer)?))
}

/// `registers`: name → value, kept as raw JSON so large integers survive
pub(crate) fn registers<'de, D>(deserializer: D) -> Result<OrderedMap<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    object(deserializer)
}

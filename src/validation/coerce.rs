//! Coercion of loosely typed form values

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

pub(super) const INVALID_DATE: &str = "Please enter a valid date";
pub(super) const EXPECTED_TEXT: &str = "Expected text";

/// Borrow the input as an object; anything else behaves as an empty form.
pub(super) fn fields(input: &Value) -> Map<String, Value> {
    match input {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    }
}

/// Text value of a form field. Missing and `null` read as empty, numbers and
/// booleans as their JSON text. Arrays and objects are not text.
pub(super) fn text(map: &Map<String, Value>, key: &str) -> Result<String, &'static str> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(EXPECTED_TEXT),
    }
}

/// Like [`text`] but an absent or blank value is `None`.
pub(super) fn optional_text(
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, &'static str> {
    text(map, key).map(|s| if s.is_empty() { None } else { Some(s) })
}

/// Number from a JSON number or a numeric string.
pub(super) fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match map.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date.
pub(super) fn date(map: &Map<String, Value>, key: &str) -> Option<NaiveDate> {
    let raw = map.get(key)?.as_str()?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

/// Ordered part names from either `["a", "b"]` or `[{"part": "a"}]`.
pub(super) fn part_list(map: &Map<String, Value>, key: &str) -> Result<Vec<String>, ()> {
    let items = match map.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(()),
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Object(obj) => obj
                .get("part")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(()),
            _ => Err(()),
        })
        .collect()
}

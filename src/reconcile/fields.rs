//! Typed field readers over loosely-typed JSON objects
//!
//! Every reader is total: a missing or mistyped field yields a default. A
//! present-but-mistyped field is logged, an absent one is not.

use serde_json::{Map, Value};
use tracing::warn;

pub(crate) type Object = Map<String, Value>;

/// Sub-object at `key`, absent when missing, null or not an object
pub(crate) fn section<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| v.is_object())
}

/// A finite number at `key`
pub(crate) fn number(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}

/// A finite number at `key`, or 0
pub(crate) fn number_or_zero(obj: &Object, key: &str) -> f64 {
    match number(obj, key) {
        Some(v) => v,
        None => {
            note_mistyped(obj, key, "number");
            0.0
        }
    }
}

/// The first of several alias keys that holds a number, or 0
pub(crate) fn first_number(obj: &Object, keys: &[&str]) -> f64 {
    if let Some(v) = keys.iter().find_map(|key| number(obj, key)) {
        return v;
    }
    for key in keys {
        note_mistyped(obj, key, "number");
    }
    0.0
}

/// A non-negative integer at any of `keys`, or 0
pub(crate) fn count(obj: &Object, keys: &[&str]) -> u64 {
    let v = first_number(obj, keys);
    if v > 0.0 {
        v.trunc() as u64
    } else {
        0
    }
}

/// Truthiness of the value at `key`: absent, null, false, 0 and "" are false
pub(crate) fn truthy(obj: &Object, key: &str) -> bool {
    match obj.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Numeric array at `key`; `None` unless the field is an array
///
/// Non-numeric elements are replaced by 0 so indices stay aligned with
/// sample groups.
pub(crate) fn number_array(obj: &Object, key: &str) -> Option<Vec<f64>> {
    let items = obj.get(key)?.as_array()?;
    let mut mistyped = 0usize;
    let values = items
        .iter()
        .map(|item| match item.as_f64().filter(|v| v.is_finite()) {
            Some(v) => v,
            None => {
                mistyped += 1;
                0.0
            }
        })
        .collect();
    if mistyped > 0 {
        warn!(field = key, mistyped, "non-numeric array elements replaced with 0");
    }
    Some(values)
}

/// Optional number: `None` when absent or mistyped
pub(crate) fn optional_number(obj: &Object, key: &str) -> Option<f64> {
    let v = number(obj, key);
    if v.is_none() {
        note_mistyped(obj, key, "number");
    }
    v
}

/// Text at the first key holding a string, or empty
pub(crate) fn text(obj: &Object, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_default()
}

fn note_mistyped(obj: &Object, key: &str, expected: &'static str) {
    match obj.get(key) {
        None | Some(Value::Null) => {}
        Some(other) => warn!(
            field = key,
            expected,
            found = kind(other),
            "mistyped field replaced with default"
        ),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

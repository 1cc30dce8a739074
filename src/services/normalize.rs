//! Tolerance for the backend's inconsistent response envelope: some endpoints
//! return bare arrays, some `{data: [...]}`, some bare objects. These helpers
//! discriminate the shape per call site instead of pretending one contract
//! exists.

use serde_json::Value;

/// Interpret a response as a list, whatever shape it arrived in.
/// Bare array -> items; `{data: [...]}` -> items; single object -> one item;
/// null/absent -> empty.
pub fn coerce_list(val: Value) -> Vec<Value> {
    match val {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => Vec::new(),
            Some(other) => vec![other],
            None => vec![Value::Object(map)],
        },
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Interpret a response as a single object, unwrapping a `data` envelope
/// only when the envelope actually carries one.
pub fn coerce_object(val: Value) -> Value {
    match val {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other_data) => {
                // data present but not an object: keep the envelope intact
                map.insert("data".to_string(), other_data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

pub fn envelope_message(val: &Value) -> Option<&str> {
    val.get("message").and_then(|v| v.as_str())
}

pub fn envelope_error(val: &Value) -> Option<&str> {
    val.get("error").and_then(|v| v.as_str())
}

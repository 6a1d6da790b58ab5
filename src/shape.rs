//! Structural predicates and extractors over raw error values.
//!
//! Raw errors enter this crate as [`serde_json::Value`] trees of unknown
//! shape. The helpers here answer structural questions ("does this carry a
//! numeric status?", "is there a usable message?") without panicking on any
//! input. Field access goes through [`Value::get`], which returns `None` for
//! every non-object value, so no helper needs a preliminary type check.
//!
//! Native exceptions crossing into this model are encoded as objects carrying
//! their class under a `name` string field (e.g. `{"name": "TypeError"}`);
//! see [`exception_named`].

use serde_json::Value;

/// Fallback message used whenever no usable message can be extracted.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Returns the value of a string field, if present.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Returns the value of a boolean field, if present.
pub fn bool_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

/// Returns the value of a numeric field as a status-code-sized integer.
///
/// Non-integral or out-of-range numbers count as absent; a status we cannot
/// represent is a status we cannot classify on.
pub fn u16_field(value: &Value, key: &str) -> Option<u16> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u16::try_from(n).ok())
}

/// Mirrors the truthiness rules of the ecosystems that produce these values:
/// `null`, `false`, `0`, and `""` are falsy; everything else is truthy,
/// including empty objects and arrays.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns true when the field is present and truthy.
pub fn has_truthy(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(is_truthy)
}

/// Returns true when the value is an encoded exception of the given class,
/// i.e. an object whose `name` field equals `name`.
pub fn exception_named(value: &Value, name: &str) -> bool {
    str_field(value, "name") == Some(name)
}

/// Digs a numeric HTTP-like status out of an arbitrarily-shaped error.
///
/// Tried in priority order: a direct numeric `status`; a numeric `status`
/// nested one level under `response`; a numeric `statusCode`; a string
/// `code` parseable as an integer. The order matters: several of these can
/// coexist on one error, and an origin-specific status must win over a
/// generic numeric-string code.
pub fn get_status(value: &Value) -> Option<u16> {
    if let Some(status) = u16_field(value, "status") {
        return Some(status);
    }
    if let Some(status) = value.get("response").and_then(|r| u16_field(r, "status")) {
        return Some(status);
    }
    if let Some(status) = u16_field(value, "statusCode") {
        return Some(status);
    }
    str_field(value, "code").and_then(|code| code.trim().parse().ok())
}

/// Attempts to extract a human-readable message from an arbitrary value:
/// the value itself if it is a non-empty string, else a non-empty `message`
/// string field (which also covers encoded native exceptions).
///
/// An empty string is never reported as a found message.
pub fn try_message(value: &Value) -> Option<&str> {
    if let Value::String(message) = value {
        if !message.is_empty() {
            return Some(message);
        }
    }
    str_field(value, "message").filter(|message| !message.is_empty())
}

/// Like [`try_message`], but total: falls back to
/// [`UNKNOWN_ERROR_MESSAGE`] when nothing usable is found.
pub fn safe_message(value: &Value) -> String {
    try_message(value)
        .map(str::to_owned)
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned())
}

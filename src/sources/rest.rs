//! Classifier for generic REST API error bodies.
//!
//! REST APIs disagree on where the interesting text lives (`error`,
//! `message`, `detail`, an `errors` array, a field-keyed `errors` object),
//! so message extraction walks those shapes in a fixed priority order. When
//! the value wraps an HTTP response, the body under `response.data` becomes
//! the effective payload.
//!
//! Unlike the axios and fetch classifiers, a missing status here maps to
//! `unknown_error` and is not considered retryable: a bare REST envelope
//! says nothing about whether a request ever went out.

use serde_json::Value;

use crate::record::{ErrorSource, ErrorType, NormalizedError};
use crate::shape;

/// Fallback message when the payload carries no usable text.
const FALLBACK_MESSAGE: &str = "Request failed";

/// Message used when an `errors` array is present but empty.
const EMPTY_ERRORS_MESSAGE: &str = "Validation errors occurred";

/// Normalizes a generic REST error value.
pub fn normalize(error: Value) -> NormalizedError {
    let status = shape::get_status(&error);
    let payload = effective_payload(&error);
    let kind = status
        .map(ErrorType::from_status)
        .unwrap_or(ErrorType::UnknownError);
    let message = payload_message(payload);
    let field = payload_field(payload);
    let retryable = status.is_some_and(|s| s >= 500 || s == 429);

    NormalizedError::new(kind, message)
        .with_status(status)
        .with_field(field)
        .with_retryable(retryable)
        .with_source(ErrorSource::Rest)
        .with_original(error)
}

/// HTTP client wrappers nest the interesting body under `response.data`;
/// when that is absent or empty the whole value is the payload.
fn effective_payload(error: &Value) -> &Value {
    match error.get("response") {
        Some(response) if response.is_object() => match response.get("data") {
            Some(data) if shape::is_truthy(data) => data,
            _ => error,
        },
        _ => error,
    }
}

/// Walks the known REST message shapes in priority order: `error`,
/// `message`, `detail`, the first element of an `errors` array, the first
/// value of a field-keyed `errors` object.
fn payload_message(payload: &Value) -> String {
    if payload.is_null() {
        return FALLBACK_MESSAGE.to_owned();
    }
    if !payload.is_object() {
        return shape::safe_message(payload);
    }

    for key in ["error", "message", "detail"] {
        if let Some(message) = shape::str_field(payload, key).filter(|m| !m.is_empty()) {
            return message.to_owned();
        }
    }

    match payload.get("errors") {
        Some(Value::Array(errors)) => {
            if errors.is_empty() {
                return EMPTY_ERRORS_MESSAGE.to_owned();
            }
            let first = &errors[0];
            if let Some(message) = first.as_str().filter(|m| !m.is_empty()) {
                return message.to_owned();
            }
            if let Some(message) = shape::str_field(first, "message").filter(|m| !m.is_empty()) {
                return message.to_owned();
            }
        }
        Some(Value::Object(errors)) => {
            if let Some(first) = errors.values().next() {
                if let Some(message) = first.as_str().filter(|m| !m.is_empty()) {
                    return message.to_owned();
                }
                // Some APIs key each field to an array of messages.
                if let Some(message) = first
                    .as_array()
                    .and_then(|messages| messages.first())
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                {
                    return message.to_owned();
                }
            }
        }
        _ => {}
    }

    FALLBACK_MESSAGE.to_owned()
}

/// Names the offending field: the first key of a field-keyed `errors`
/// object, else a direct `field` property.
fn payload_field(payload: &Value) -> Option<String> {
    if let Some(errors) = payload.get("errors").and_then(Value::as_object) {
        if let Some(field) = errors.keys().next() {
            return Some(field.clone());
        }
    }
    shape::str_field(payload, "field").map(str::to_owned)
}

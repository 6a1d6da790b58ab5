//! Classifier for axios-like HTTP client errors.
//!
//! These clients throw one error object for three distinct failures, told
//! apart in priority order: a connection-abort code (`ECONNABORTED`) marks a
//! timeout, a `request` with no `response` marks a network failure where
//! nothing came back, and a `response` marks an HTTP error status whose body
//! often carries a better message than the error object itself.

use serde_json::Value;

use crate::record::{ErrorSource, ErrorType, NormalizedError};
use crate::shape;

/// Normalizes an axios-like client error value.
pub fn normalize(error: Value) -> NormalizedError {
    // ECONNABORTED can appear with or without a response; timeout wins.
    if shape::str_field(&error, "code") == Some("ECONNABORTED") {
        let message = shape::safe_message(&error);
        return NormalizedError::new(ErrorType::Timeout, message)
            .with_retryable(true)
            .with_source(ErrorSource::Axios)
            .with_original(error);
    }

    // A request that never got a response is a network failure.
    if shape::has_truthy(&error, "request") && !shape::has_truthy(&error, "response") {
        let message = shape::safe_message(&error);
        return NormalizedError::new(ErrorType::NetworkError, message)
            .with_retryable(true)
            .with_source(ErrorSource::Axios)
            .with_original(error);
    }

    if shape::has_truthy(&error, "response") {
        let status = error
            .get("response")
            .and_then(|response| shape::u16_field(response, "status"));
        let kind = status
            .map(ErrorType::from_status)
            .unwrap_or(ErrorType::NetworkError);
        let message =
            response_body_message(&error).unwrap_or_else(|| shape::safe_message(&error));
        let retryable = is_retryable(status, &error);
        let field = response_body_field(&error);

        return NormalizedError::new(kind, message)
            .with_status(status)
            .with_field(field)
            .with_retryable(retryable)
            .with_source(ErrorSource::Axios)
            .with_original(error);
    }

    let message = shape::safe_message(&error);
    NormalizedError::new(ErrorType::UnknownError, message)
        .with_source(ErrorSource::Axios)
        .with_original(error)
}

fn is_retryable(status: Option<u16>, error: &Value) -> bool {
    let Some(status) = status else {
        // No status means nothing usable came back; assume transient.
        return true;
    };
    status >= 500
        || status == 429
        || shape::str_field(error, "code") == Some("ECONNABORTED")
        || shape::exception_named(error, "TimeoutError")
}

/// Returns the response body nested under `response.data`, when present.
fn response_data(error: &Value) -> Option<&Value> {
    error
        .get("response")
        .and_then(|response| response.get("data"))
        .filter(|data| data.is_object())
}

/// Digs a message out of the response body: a `message` string, an `error`
/// string, or the first value of a field-keyed `errors` object.
fn response_body_message(error: &Value) -> Option<String> {
    let data = response_data(error)?;

    if let Some(message) = shape::str_field(data, "message").filter(|m| !m.is_empty()) {
        return Some(message.to_owned());
    }
    if let Some(message) = shape::str_field(data, "error").filter(|m| !m.is_empty()) {
        return Some(message.to_owned());
    }
    let errors = data.get("errors").and_then(Value::as_object)?;
    errors
        .values()
        .next()
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Names the offending field: the first key of a field-keyed `errors`
/// object in the response body, else a direct `field` property.
fn response_body_field(error: &Value) -> Option<String> {
    let data = response_data(error)?;

    if let Some(errors) = data.get("errors").and_then(Value::as_object) {
        if let Some(field) = errors.keys().next() {
            return Some(field.clone());
        }
    }
    shape::str_field(data, "field").map(str::to_owned)
}

//! Classifier for GraphQL error payloads.
//!
//! Accepts either a response-level payload with an `errors` array (the first
//! element wins) or a single error object carrying a `message`. The semantic
//! category comes from the `extensions.code` convention; GraphQL transports
//! HTTP-level failures separately, so only server errors and rate limits are
//! considered retryable here.

use serde_json::Value;

use crate::record::{ErrorSource, ErrorType, NormalizedError};
use crate::shape;

/// Fallback message when no usable GraphQL error can be found.
const FALLBACK_MESSAGE: &str = "GraphQL error occurred";

/// Normalizes a GraphQL error payload.
pub fn normalize(error: Value) -> NormalizedError {
    // Response-level payload: take the first error of a non-empty array.
    // An empty array carries no usable error and falls through.
    if let Some(first) = error
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let parts = classify_entry(first);
        return build(parts, error);
    }

    // A single error object, not wrapped in an array.
    if shape::str_field(&error, "message").is_some_and(|m| !m.is_empty()) {
        let parts = classify_entry(&error);
        return build(parts, error);
    }

    NormalizedError::new(ErrorType::UnknownError, FALLBACK_MESSAGE)
        .with_source(ErrorSource::Graphql)
        .with_original(error)
}

struct EntryParts {
    kind: ErrorType,
    message: String,
    code: Option<String>,
    field: Option<String>,
    retryable: bool,
}

fn build(parts: EntryParts, original: Value) -> NormalizedError {
    NormalizedError::new(parts.kind, parts.message)
        .with_code(parts.code)
        .with_field(parts.field)
        .with_retryable(parts.retryable)
        .with_source(ErrorSource::Graphql)
        .with_original(original)
}

/// Extracts the canonical pieces from one GraphQL error object.
fn classify_entry(entry: &Value) -> EntryParts {
    let message = shape::str_field(entry, "message")
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned());
    let code = entry
        .get("extensions")
        .and_then(|extensions| shape::str_field(extensions, "code"))
        .map(str::to_owned);
    let kind = code
        .as_deref()
        .map(kind_for_code)
        .unwrap_or(ErrorType::UnknownError);
    let field = field_from_entry(entry);
    let retryable = matches!(kind, ErrorType::ServerError | ErrorType::RateLimited);

    EntryParts {
        kind,
        message,
        code,
        field,
        retryable,
    }
}

/// Maps a GraphQL `extensions.code` to its semantic category,
/// case-insensitively. Unrecognized codes are unknown.
fn kind_for_code(code: &str) -> ErrorType {
    match code.to_ascii_uppercase().as_str() {
        "UNAUTHENTICATED" => ErrorType::AuthenticationError,
        "FORBIDDEN" => ErrorType::AuthorizationError,
        "NOT_FOUND" => ErrorType::NotFound,
        "VALIDATION_ERROR" | "BAD_USER_INPUT" => ErrorType::ValidationError,
        "INTERNAL_ERROR" => ErrorType::ServerError,
        "RATE_LIMITED" => ErrorType::RateLimited,
        _ => ErrorType::UnknownError,
    }
}

/// Names the offending field: `extensions.field` when present, else the
/// last segment of the error `path` when that segment is a string.
fn field_from_entry(entry: &Value) -> Option<String> {
    if let Some(field) = entry
        .get("extensions")
        .and_then(|extensions| shape::str_field(extensions, "field"))
    {
        return Some(field.to_owned());
    }
    entry
        .get("path")
        .and_then(Value::as_array)
        .and_then(|path| path.last())
        .and_then(Value::as_str)
        .map(str::to_owned)
}

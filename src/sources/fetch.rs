//! Classifier for fetch-style errors.
//!
//! Covers the three ways a fetch call fails: a `TypeError` with no status
//! (the request never reached a server), an `AbortError` (the caller's
//! timeout fired), and an error-status response. Responses carry no body
//! here, so only the status drives the category.

use serde_json::Value;

use crate::record::{ErrorSource, ErrorType, NormalizedError};
use crate::shape;

/// Normalizes a fetch-style error value.
pub fn normalize(error: Value) -> NormalizedError {
    let status = shape::get_status(&error);

    // A TypeError without a status means the request itself failed.
    if status.is_none() && shape::exception_named(&error, "TypeError") {
        return NormalizedError::new(ErrorType::NetworkError, "Network request failed")
            .with_retryable(true)
            .with_source(ErrorSource::Fetch)
            .with_original(error);
    }

    if shape::exception_named(&error, "AbortError") {
        return NormalizedError::new(ErrorType::Timeout, "Request timed out")
            .with_retryable(true)
            .with_source(ErrorSource::Fetch)
            .with_original(error);
    }

    let kind = status
        .map(ErrorType::from_status)
        .unwrap_or(ErrorType::NetworkError);
    let message = shape::safe_message(&error);
    let retryable = is_retryable(status, &error);

    NormalizedError::new(kind, message)
        .with_status(status)
        .with_retryable(retryable)
        .with_source(ErrorSource::Fetch)
        .with_original(error)
}

fn is_retryable(status: Option<u16>, error: &Value) -> bool {
    match status {
        // No status means the request never completed; assume transient.
        None => true,
        Some(status) => {
            status >= 500 || status == 429 || shape::exception_named(error, "TimeoutError")
        }
    }
}

//! Classifier for plain runtime errors.
//!
//! The catch-all for values with no recognizable ecosystem shape: native
//! exceptions, plain strings, and arbitrary objects. Nothing can be inferred
//! beyond a message, so the record is always `unknown_error` and never
//! retryable.

use serde_json::Value;

use crate::record::{ErrorSource, ErrorType, NormalizedError};
use crate::shape;

/// Normalizes a plain runtime error value.
pub fn normalize(error: Value) -> NormalizedError {
    let message = shape::safe_message(&error);

    NormalizedError::new(ErrorType::UnknownError, message)
        .with_source(ErrorSource::Runtime)
        .with_original(error)
}

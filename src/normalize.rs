//! The public normalization entry point.
//!
//! Resolves which classifier should handle a raw error and routes the value
//! to it. An explicit caller override always wins over shape detection.
//! Normalization never fails: whatever comes in, a well-formed
//! [`NormalizedError`] comes out.

use serde_json::Value;
use tracing::debug;

use crate::detector::SourceDetector;
use crate::record::{ErrorSource, NormalizedError};
use crate::sources;

/// Options accepted by [`normalize_error_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizeOptions {
    /// Forces a specific classifier, skipping shape detection entirely.
    /// The override wins even when the value's shape says otherwise.
    pub source: Option<ErrorSource>,
    /// Reserved for future default-filling of the retryable flag.
    /// No classifier consults it yet.
    pub default_retryable: Option<bool>,
}

impl NormalizeOptions {
    /// Creates empty options: detect the source, no default overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the given classifier.
    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the reserved default-retryable hint.
    pub fn with_default_retryable(mut self, retryable: bool) -> Self {
        self.default_retryable = Some(retryable);
        self
    }
}

/// Normalizes a raw error value, detecting its source from shape alone.
///
/// Equivalent to [`normalize_error_with`] with default options.
pub fn normalize_error(error: impl Into<Value>) -> NormalizedError {
    normalize_error_with(error, &NormalizeOptions::default())
}

/// Normalizes a raw error value with explicit options.
///
/// When `options.source` is set, that classifier runs directly; otherwise
/// the detector picks one. A [`ErrorSource::Custom`] override has no
/// classifier of its own and routes through the runtime classifier, keeping
/// the caller's source tag on the record.
pub fn normalize_error_with(error: impl Into<Value>, options: &NormalizeOptions) -> NormalizedError {
    let error = error.into();
    let source = options
        .source
        .unwrap_or_else(|| SourceDetector::new().detect(&error));
    debug!(%source, overridden = options.source.is_some(), "normalizing error");

    match source {
        ErrorSource::Axios => sources::axios::normalize(error),
        ErrorSource::Fetch => sources::fetch::normalize(error),
        ErrorSource::Graphql => sources::graphql::normalize(error),
        ErrorSource::Rest => sources::rest::normalize(error),
        ErrorSource::Runtime => sources::runtime::normalize(error),
        ErrorSource::Custom => {
            sources::runtime::normalize(error).with_source(ErrorSource::Custom)
        }
    }
}

//! The canonical error record and its supporting enumerations.
//!
//! Every classifier in this crate funnels into [`NormalizedError`], a single
//! normalized shape callers can branch on without knowing which subsystem
//! produced the raw error. Construction always goes through
//! [`NormalizedError::new`] plus the `with_*` builder methods, so field
//! defaults are centralized and cannot drift between classifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The semantic category of a normalized error.
///
/// This is a closed enumeration: classifiers that cannot positively identify
/// a shape fall back to [`ErrorType::UnknownError`] rather than inventing new
/// categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The request never produced a usable response (DNS, TCP, TLS, offline).
    NetworkError,
    /// The operation was aborted for taking too long.
    Timeout,
    /// The server rejected the input data (HTTP 422, GraphQL bad input).
    ValidationError,
    /// Missing or invalid credentials (HTTP 401).
    AuthenticationError,
    /// Authenticated but not allowed (HTTP 403).
    AuthorizationError,
    /// The requested resource does not exist (HTTP 404).
    NotFound,
    /// The request conflicts with current server state (HTTP 409).
    Conflict,
    /// The caller exceeded a rate limit (HTTP 429).
    RateLimited,
    /// The server failed (HTTP 5xx).
    ServerError,
    /// A request-side error not covered by a more specific category.
    ClientError,
    /// Nothing more specific could be determined.
    UnknownError,
}

impl ErrorType {
    /// Maps an HTTP-like status code to its semantic category.
    ///
    /// This is the shared table used by the axios, fetch, and rest
    /// classifiers. Callers decide what a *missing* status means (the
    /// classifiers disagree on purpose), so this only covers present codes.
    /// Any code without a dedicated row, including informational and
    /// redirect codes, lands on [`ErrorType::ClientError`].
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorType::ClientError,
            401 => ErrorType::AuthenticationError,
            403 => ErrorType::AuthorizationError,
            404 => ErrorType::NotFound,
            409 => ErrorType::Conflict,
            422 => ErrorType::ValidationError,
            429 => ErrorType::RateLimited,
            s if s >= 500 => ErrorType::ServerError,
            _ => ErrorType::ClientError,
        }
    }

    /// Returns the snake_case wire tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::NetworkError => "network_error",
            ErrorType::Timeout => "timeout",
            ErrorType::ValidationError => "validation_error",
            ErrorType::AuthenticationError => "authentication_error",
            ErrorType::AuthorizationError => "authorization_error",
            ErrorType::NotFound => "not_found",
            ErrorType::Conflict => "conflict",
            ErrorType::RateLimited => "rate_limited",
            ErrorType::ServerError => "server_error",
            ErrorType::ClientError => "client_error",
            ErrorType::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "network_error" => Ok(ErrorType::NetworkError),
            "timeout" => Ok(ErrorType::Timeout),
            "validation_error" => Ok(ErrorType::ValidationError),
            "authentication_error" => Ok(ErrorType::AuthenticationError),
            "authorization_error" => Ok(ErrorType::AuthorizationError),
            "not_found" => Ok(ErrorType::NotFound),
            "conflict" => Ok(ErrorType::Conflict),
            "rate_limited" => Ok(ErrorType::RateLimited),
            "server_error" => Ok(ErrorType::ServerError),
            "client_error" => Ok(ErrorType::ClientError),
            "unknown_error" => Ok(ErrorType::UnknownError),
            other => Err(ParseTagError(other.to_string())),
        }
    }
}

/// The producing ecosystem a normalized error was classified from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    /// A fetch-style response or network/abort exception.
    Fetch,
    /// An axios-like HTTP client error object.
    Axios,
    /// A GraphQL error payload.
    Graphql,
    /// A generic REST API error body.
    Rest,
    /// A plain runtime value: native exceptions, strings, arbitrary objects.
    Runtime,
    /// A record built manually by the caller.
    Custom,
}

impl ErrorSource {
    /// Returns the snake_case wire tag for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSource::Fetch => "fetch",
            ErrorSource::Axios => "axios",
            ErrorSource::Graphql => "graphql",
            ErrorSource::Rest => "rest",
            ErrorSource::Runtime => "runtime",
            ErrorSource::Custom => "custom",
        }
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorSource {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fetch" => Ok(ErrorSource::Fetch),
            "axios" => Ok(ErrorSource::Axios),
            "graphql" => Ok(ErrorSource::Graphql),
            "rest" => Ok(ErrorSource::Rest),
            "runtime" => Ok(ErrorSource::Runtime),
            "custom" => Ok(ErrorSource::Custom),
            other => Err(ParseTagError(other.to_string())),
        }
    }
}

/// Error returned when a wire tag does not name a known
/// [`ErrorType`] or [`ErrorSource`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized tag: {0}")]
pub struct ParseTagError(String);

/// A normalized error: one shape for every raw error this crate understands.
///
/// `kind`, `message`, `retryable`, and `source` are always populated. The
/// optional fields are present only when the origin exposed them, and are
/// omitted from serialized output when absent. `original` carries the raw
/// input value through unchanged for downstream diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// The semantic category of the error.
    #[serde(rename = "type")]
    pub kind: ErrorType,
    /// Human-readable description; never empty.
    pub message: String,
    /// HTTP-like status code, when the origin exposed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Origin-specific string code (e.g. a GraphQL error code).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// The offending input field, when extractable from validation payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Free-form extra context. No built-in classifier fills this; it is
    /// part of the contract for callers constructing records manually.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Whether the operation that produced this error is generally safe to
    /// retry unchanged. Advisory only; this crate performs no retries.
    pub retryable: bool,
    /// Which classification path produced this record.
    pub source: ErrorSource,
    /// The raw input value, moved in untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<Value>,
}

impl NormalizedError {
    /// Creates a normalized error with the crate-wide defaults: no optional
    /// fields, `retryable` false, and `source` set to
    /// [`ErrorSource::Custom`].
    ///
    /// Every record in this crate, classifier output and manual
    /// construction alike, starts here, so the defaults live in exactly
    /// one place.
    pub fn new(kind: ErrorType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            field: None,
            details: None,
            retryable: false,
            source: ErrorSource::Custom,
            original: None,
        }
    }

    /// Sets the HTTP-like status code. Accepts `u16` or `Option<u16>`.
    pub fn with_status(mut self, status: impl Into<Option<u16>>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the origin-specific string code.
    pub fn with_code(mut self, code: impl Into<Option<String>>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the offending input field name.
    pub fn with_field(mut self, field: impl Into<Option<String>>) -> Self {
        self.field = field.into();
        self
    }

    /// Attaches free-form extra context.
    pub fn with_details(mut self, details: impl Into<Option<Value>>) -> Self {
        self.details = details.into();
        self
    }

    /// Sets the retryability flag.
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Records which classification path produced this record.
    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = source;
        self
    }

    /// Moves the raw input value into the record for diagnostics.
    pub fn with_original(mut self, original: Value) -> Self {
        self.original = Some(original);
        self
    }

    /// Returns true if the producing operation is generally safe to retry.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Returns true if this error rejects input data.
    pub fn is_validation_error(&self) -> bool {
        self.kind == ErrorType::ValidationError
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NormalizedError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_applies_central_defaults() {
        let error = NormalizedError::new(ErrorType::UnknownError, "boom");

        assert_eq!(error.kind, ErrorType::UnknownError);
        assert_eq!(error.message, "boom");
        assert_eq!(error.status, None);
        assert_eq!(error.code, None);
        assert_eq!(error.field, None);
        assert_eq!(error.details, None);
        assert!(!error.retryable);
        assert_eq!(error.source, ErrorSource::Custom);
        assert_eq!(error.original, None);
    }

    #[test]
    fn test_builder_sets_every_field() {
        let error = NormalizedError::new(ErrorType::ValidationError, "Email is required")
            .with_status(422)
            .with_code("VALIDATION_ERROR".to_string())
            .with_field("email".to_string())
            .with_details(json!({"attempt": 3}))
            .with_retryable(false)
            .with_source(ErrorSource::Graphql)
            .with_original(json!({"errors": []}));

        assert_eq!(error.status, Some(422));
        assert_eq!(error.code.as_deref(), Some("VALIDATION_ERROR"));
        assert_eq!(error.field.as_deref(), Some("email"));
        assert_eq!(error.details, Some(json!({"attempt": 3})));
        assert_eq!(error.source, ErrorSource::Graphql);
        assert_eq!(error.original, Some(json!({"errors": []})));
    }

    #[test]
    fn test_builder_accepts_optional_values() {
        let status: Option<u16> = None;
        let error = NormalizedError::new(ErrorType::UnknownError, "boom")
            .with_status(status)
            .with_code(None)
            .with_field(None);

        assert_eq!(error.status, None);
        assert_eq!(error.code, None);
        assert_eq!(error.field, None);
    }

    #[test]
    fn test_guards() {
        let retryable = NormalizedError::new(ErrorType::ServerError, "oops").with_retryable(true);
        let validation = NormalizedError::new(ErrorType::ValidationError, "bad email");

        assert!(retryable.is_retryable());
        assert!(!retryable.is_validation_error());
        assert!(validation.is_validation_error());
        assert!(!validation.is_retryable());
    }

    #[test]
    fn test_from_status_table() {
        let table = [
            (400, ErrorType::ClientError),
            (401, ErrorType::AuthenticationError),
            (403, ErrorType::AuthorizationError),
            (404, ErrorType::NotFound),
            (409, ErrorType::Conflict),
            (422, ErrorType::ValidationError),
            (429, ErrorType::RateLimited),
            (500, ErrorType::ServerError),
            (503, ErrorType::ServerError),
            (599, ErrorType::ServerError),
        ];
        for (status, expected) in table {
            assert_eq!(ErrorType::from_status(status), expected, "status {status}");
        }
    }

    #[test]
    fn test_from_status_unlisted_codes_are_client_errors() {
        assert_eq!(ErrorType::from_status(418), ErrorType::ClientError);
        assert_eq!(ErrorType::from_status(302), ErrorType::ClientError);
        assert_eq!(ErrorType::from_status(200), ErrorType::ClientError);
    }

    #[test]
    fn test_type_tags_round_trip() {
        let kinds = [
            ErrorType::NetworkError,
            ErrorType::Timeout,
            ErrorType::ValidationError,
            ErrorType::AuthenticationError,
            ErrorType::AuthorizationError,
            ErrorType::NotFound,
            ErrorType::Conflict,
            ErrorType::RateLimited,
            ErrorType::ServerError,
            ErrorType::ClientError,
            ErrorType::UnknownError,
        ];
        for kind in kinds {
            assert_eq!(kind.as_str().parse::<ErrorType>(), Ok(kind));
        }
        assert!("no_such_type".parse::<ErrorType>().is_err());
    }

    #[test]
    fn test_source_tags_round_trip() {
        let sources = [
            ErrorSource::Fetch,
            ErrorSource::Axios,
            ErrorSource::Graphql,
            ErrorSource::Rest,
            ErrorSource::Runtime,
            ErrorSource::Custom,
        ];
        for source in sources {
            assert_eq!(source.as_str().parse::<ErrorSource>(), Ok(source));
        }
        assert!("carrier_pigeon".parse::<ErrorSource>().is_err());
    }

    #[test]
    fn test_display_is_the_message() {
        let error = NormalizedError::new(ErrorType::Timeout, "Request timed out");
        assert_eq!(format!("{error}"), "Request timed out");
    }

    #[test]
    fn test_serializes_with_wire_tags_and_omits_absent_fields() {
        let error = NormalizedError::new(ErrorType::RateLimited, "Too Many Requests")
            .with_status(429)
            .with_retryable(true)
            .with_source(ErrorSource::Fetch);

        let value = serde_json::to_value(&error).expect("record should serialize");
        assert_eq!(
            value,
            json!({
                "type": "rate_limited",
                "message": "Too Many Requests",
                "status": 429,
                "retryable": true,
                "source": "fetch"
            })
        );
    }

    #[test]
    fn test_deserializes_from_wire_shape() {
        let error: NormalizedError = serde_json::from_value(json!({
            "type": "not_found",
            "message": "gone",
            "retryable": false,
            "source": "rest"
        }))
        .expect("record should deserialize");

        assert_eq!(error.kind, ErrorType::NotFound);
        assert_eq!(error.source, ErrorSource::Rest);
        assert_eq!(error.status, None);
    }
}

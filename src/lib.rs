//! Erratum - normalizes heterogeneous error values into one record.
//!
//! Raw errors from different ecosystems (axios-like HTTP clients, fetch
//! calls, GraphQL payloads, generic REST bodies, plain runtime values) all
//! describe the same few failures in incompatible shapes. This crate
//! inspects a raw [`serde_json::Value`], decides which ecosystem most likely
//! produced it, and extracts one canonical record callers can branch on:
//! a semantic category, a human-readable message, optional
//! status/code/field, and a retryability flag.
//!
//! ```
//! use erratum::{normalize_error, ErrorType};
//! use serde_json::json;
//!
//! let error = normalize_error(json!({
//!     "response": {
//!         "status": 422,
//!         "data": {"errors": {"email": "Invalid email format"}}
//!     }
//! }));
//!
//! assert_eq!(error.kind, ErrorType::ValidationError);
//! assert_eq!(error.field.as_deref(), Some("email"));
//! assert!(!error.is_retryable());
//! ```
//!
//! Normalization never fails and never panics: any value that cannot be
//! positively identified degrades to `unknown_error` with a non-empty
//! fallback message.

pub mod detector;
pub mod normalize;
pub mod record;
pub mod shape;
pub mod sources;

// Re-export the main types for convenient access
pub use detector::{ShapeRule, SourceDetector};
pub use normalize::{normalize_error, normalize_error_with, NormalizeOptions};
pub use record::{ErrorSource, ErrorType, NormalizedError, ParseTagError};

//! Per-source classifiers.
//!
//! One module per recognized producing ecosystem, each mapping that
//! ecosystem's typical error shapes to the canonical record. Classifiers are
//! self-contained (none depends on another) and total: any extraction
//! failure degrades to the safest default (`unknown_error`, a non-empty
//! message, `retryable = false`) rather than propagating a failure.

pub mod axios;
pub mod fetch;
pub mod graphql;
pub mod rest;
pub mod runtime;

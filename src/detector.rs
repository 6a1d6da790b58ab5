//! Shape-based source detection for raw error values.
//!
//! The detector guesses which ecosystem produced a raw error by running an
//! ordered chain of structural rules over it. Evaluation is top to bottom,
//! first match wins, and the order is a contract: unambiguous markers
//! (an explicit client-library flag, a GraphQL `errors` array) must be
//! checked before the generic numeric-status and nested-response heuristics
//! that would otherwise misclassify those payloads as plain fetch or rest
//! errors. When no rule matches, detection falls back to
//! [`ErrorSource::Runtime`].

use serde_json::Value;
use tracing::trace;

use crate::record::ErrorSource;
use crate::shape;

/// A single predicate → source entry in the detection chain.
#[derive(Clone, Copy, Debug)]
pub struct ShapeRule {
    /// The structural test applied to the raw value.
    matches: fn(&Value) -> bool,
    /// The source assigned when this rule matches.
    source: ErrorSource,
    /// A human-readable description of what this rule detects.
    description: &'static str,
}

impl ShapeRule {
    /// Creates a new shape rule.
    pub fn new(
        matches: fn(&Value) -> bool,
        source: ErrorSource,
        description: &'static str,
    ) -> Self {
        Self {
            matches,
            source,
            description,
        }
    }

    /// Checks whether this rule matches the given value.
    pub fn matches(&self, value: &Value) -> bool {
        (self.matches)(value)
    }

    /// Returns the source this rule assigns.
    pub fn source(&self) -> ErrorSource {
        self.source
    }

    /// Returns the description of what this rule detects.
    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// Detects the producing ecosystem of a raw error from its shape alone.
#[derive(Clone, Debug)]
pub struct SourceDetector {
    /// The rules to evaluate, in priority order.
    rules: Vec<ShapeRule>,
}

impl Default for SourceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceDetector {
    /// Creates a detector with the default rule chain.
    pub fn new() -> Self {
        Self {
            rules: Self::default_rules(),
        }
    }

    /// Creates a detector with a custom rule chain. Rules may only map into
    /// the existing [`ErrorSource`] set; genuinely unknown sources must go
    /// through the explicit override on `NormalizeOptions` instead.
    pub fn with_rules(rules: Vec<ShapeRule>) -> Self {
        Self { rules }
    }

    /// Returns the default detection chain, in priority order.
    fn default_rules() -> Vec<ShapeRule> {
        vec![
            // Explicit client-library marker, the least ambiguous signal.
            ShapeRule::new(
                |v| shape::bool_field(v, "isAxiosError") == Some(true),
                ErrorSource::Axios,
                "isAxiosError marker flag",
            ),
            // A GraphQL response wraps its errors in an array, even when
            // empty. Must precede the numeric-status rules: a GraphQL
            // payload can also carry a status.
            ShapeRule::new(
                |v| v.get("errors").is_some_and(Value::is_array),
                ErrorSource::Graphql,
                "array-valued errors field",
            ),
            // A fetch Response exposes a boolean `ok` next to its status.
            ShapeRule::new(
                |v| {
                    shape::bool_field(v, "ok").is_some()
                        && v.get("status").is_some_and(Value::is_number)
                },
                ErrorSource::Fetch,
                "Response-like ok/status pair",
            ),
            // Fetch surfaces generic network failures as TypeError.
            ShapeRule::new(
                |v| shape::exception_named(v, "TypeError"),
                ErrorSource::Fetch,
                "TypeError exception",
            ),
            // Aborted fetch requests surface as AbortError.
            ShapeRule::new(
                |v| shape::exception_named(v, "AbortError"),
                ErrorSource::Fetch,
                "AbortError exception",
            ),
            // HTTP client wrappers nest the response body under
            // response.data.
            ShapeRule::new(
                |v| {
                    v.get("response").is_some_and(|r| {
                        r.is_object() && r.get("data").is_some_and(shape::is_truthy)
                    })
                },
                ErrorSource::Rest,
                "nested response.data payload",
            ),
            // A single GraphQL error object, not wrapped in an array.
            ShapeRule::new(
                |v| v.get("extensions").is_some_and(Value::is_object),
                ErrorSource::Graphql,
                "object-valued extensions field",
            ),
            // Generic numeric status with no more specific marker.
            ShapeRule::new(
                |v| v.get("status").is_some_and(Value::is_number),
                ErrorSource::Fetch,
                "numeric status field",
            ),
            // Common REST error envelopes.
            ShapeRule::new(
                |v| {
                    ["response", "error", "detail", "errors"]
                        .iter()
                        .any(|key| shape::has_truthy(v, key))
                },
                ErrorSource::Rest,
                "response/error/detail/errors envelope",
            ),
        ]
    }

    /// Appends a custom rule to the end of the chain.
    pub fn add_rule(&mut self, rule: ShapeRule) {
        self.rules.push(rule);
    }

    /// Returns the number of rules configured.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns a reference to the configured rules.
    pub fn rules(&self) -> &[ShapeRule] {
        &self.rules
    }

    /// Returns the source of the first matching rule, or
    /// [`ErrorSource::Runtime`] when nothing matches: plain strings, nulls,
    /// and native errors without special shape all land there.
    pub fn detect(&self, value: &Value) -> ErrorSource {
        for rule in &self.rules {
            if rule.matches(value) {
                trace!(
                    rule = rule.description(),
                    source = %rule.source(),
                    "shape rule matched"
                );
                return rule.source();
            }
        }
        trace!("no shape rule matched, defaulting to runtime");
        ErrorSource::Runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detect(value: Value) -> ErrorSource {
        SourceDetector::new().detect(&value)
    }

    #[test]
    fn test_detects_axios_marker() {
        assert_eq!(
            detect(json!({"isAxiosError": true, "message": "boom"})),
            ErrorSource::Axios
        );
    }

    #[test]
    fn test_axios_marker_must_be_true() {
        assert_eq!(
            detect(json!({"isAxiosError": false, "message": "boom"})),
            ErrorSource::Runtime
        );
    }

    #[test]
    fn test_detects_graphql_errors_array() {
        assert_eq!(
            detect(json!({"errors": [{"message": "bad"}]})),
            ErrorSource::Graphql
        );
        // An empty array still marks the payload as GraphQL-shaped.
        assert_eq!(detect(json!({"errors": []})), ErrorSource::Graphql);
    }

    #[test]
    fn test_detects_fetch_response_shape() {
        assert_eq!(
            detect(json!({"ok": false, "status": 404})),
            ErrorSource::Fetch
        );
    }

    #[test]
    fn test_detects_fetch_exceptions() {
        assert_eq!(
            detect(json!({"name": "TypeError", "message": "Failed to fetch"})),
            ErrorSource::Fetch
        );
        assert_eq!(
            detect(json!({"name": "AbortError", "message": "aborted"})),
            ErrorSource::Fetch
        );
    }

    #[test]
    fn test_detects_nested_response_data_as_rest() {
        assert_eq!(
            detect(json!({"response": {"status": 400, "data": {"error": "Bad"}}})),
            ErrorSource::Rest
        );
    }

    #[test]
    fn test_detects_single_graphql_error_via_extensions() {
        assert_eq!(
            detect(json!({"message": "bad", "extensions": {"code": "FORBIDDEN"}})),
            ErrorSource::Graphql
        );
    }

    #[test]
    fn test_detects_bare_status_as_fetch() {
        assert_eq!(
            detect(json!({"status": 503, "message": "down"})),
            ErrorSource::Fetch
        );
    }

    #[test]
    fn test_detects_rest_envelopes() {
        assert_eq!(detect(json!({"error": "boom"})), ErrorSource::Rest);
        assert_eq!(detect(json!({"detail": "boom"})), ErrorSource::Rest);
        assert_eq!(detect(json!({"errors": {"email": "bad"}})), ErrorSource::Rest);
        // response present but data missing still reads as rest.
        assert_eq!(
            detect(json!({"response": {"status": 400, "data": null}})),
            ErrorSource::Rest
        );
    }

    #[test]
    fn test_falls_back_to_runtime() {
        assert_eq!(detect(json!(null)), ErrorSource::Runtime);
        assert_eq!(detect(json!("Simple error")), ErrorSource::Runtime);
        assert_eq!(detect(json!(42)), ErrorSource::Runtime);
        assert_eq!(detect(json!([1, 2, 3])), ErrorSource::Runtime);
        assert_eq!(detect(json!({"message": "plain"})), ErrorSource::Runtime);
        assert_eq!(
            detect(json!({"name": "Error", "message": "plain"})),
            ErrorSource::Runtime
        );
    }

    #[test]
    fn test_axios_flag_beats_graphql_array() {
        assert_eq!(
            detect(json!({"isAxiosError": true, "errors": []})),
            ErrorSource::Axios
        );
    }

    #[test]
    fn test_graphql_array_beats_numeric_status() {
        assert_eq!(
            detect(json!({"errors": [], "status": 500})),
            ErrorSource::Graphql
        );
    }

    #[test]
    fn test_extensions_beat_numeric_status() {
        assert_eq!(
            detect(json!({"extensions": {}, "status": 500})),
            ErrorSource::Graphql
        );
    }

    #[test]
    fn test_response_data_beats_extensions() {
        assert_eq!(
            detect(json!({
                "response": {"data": {"error": "x"}},
                "extensions": {"code": "FORBIDDEN"}
            })),
            ErrorSource::Rest
        );
    }

    #[test]
    fn test_numeric_status_beats_generic_envelope() {
        assert_eq!(
            detect(json!({"status": 400, "error": "boom"})),
            ErrorSource::Fetch
        );
    }

    #[test]
    fn test_custom_rules_extend_the_chain() {
        let mut detector = SourceDetector::new();
        let default_count = detector.rule_count();
        detector.add_rule(ShapeRule::new(
            |v| shape::has_truthy(v, "graphQLErrors"),
            ErrorSource::Graphql,
            "apollo client error envelope",
        ));

        assert_eq!(detector.rule_count(), default_count + 1);
        assert_eq!(
            detector.detect(&json!({"graphQLErrors": [{}]})),
            ErrorSource::Graphql
        );
    }
}

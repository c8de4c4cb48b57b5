//! Distributed trace identifiers attached to formatted records

use serde::{Deserialize, Serialize};

/// Trace context for correlating a record with a distributed request trace
///
/// The crate never discovers or propagates these identifiers; a caller hands
/// them over through the trace accessor and they are copied to the output
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceContext {
    /// Trace ID for request correlation
    pub trace_id: String,

    /// Span ID for this operation
    pub span_id: String,

    /// Sampling decision; absent means sampled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_sampled: Option<bool>,
}

impl TraceContext {
    /// Create a new trace context with no explicit sampling decision
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            trace_sampled: None,
        }
    }

    /// Set an explicit sampling decision
    pub fn with_sampled(mut self, sampled: bool) -> Self {
        self.trace_sampled = Some(sampled);
        self
    }

    /// Effective sampling flag
    pub fn sampled(&self) -> bool {
        self.trace_sampled.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampled_defaults_to_true() {
        let trace = TraceContext::new("trace-123", "span-456");
        assert_eq!(trace.trace_sampled, None);
        assert!(trace.sampled());
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let trace = TraceContext::new("trace-123", "span-456").with_sampled(false);
        assert!(!trace.sampled());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let trace: TraceContext =
            serde_json::from_str(r#"{"traceId":"t1","spanId":"s1"}"#).unwrap();
        assert_eq!(trace, TraceContext::new("t1", "s1"));

        let trace: TraceContext =
            serde_json::from_str(r#"{"traceId":"t1","spanId":"s1","traceSampled":false}"#)
                .unwrap();
        assert_eq!(trace.trace_sampled, Some(false));
    }
}

//! Caller-supplied enrichment accessors
//!
//! Each accessor is a zero-argument callback evaluated once per formatted
//! record. A failing accessor fails the whole format call; nothing here
//! retries, caches or substitutes a fallback value.

use super::error::{AccessorError, LoggerError, Result};
use super::labels::{Labels, CORRELATION_ID_LABEL, TENANT_ID_LABEL};
use super::trace_context::TraceContext;
use std::fmt;
use std::sync::Arc;

/// Result type returned by accessors
pub type AccessorResult<T> = std::result::Result<T, AccessorError>;

/// Returns the trace context of the current operation, if there is one
pub type GetTraceFn = Arc<dyn Fn() -> AccessorResult<Option<TraceContext>> + Send + Sync>;

/// Returns the labels to attach to the current record
pub type GetLabelsFn = Arc<dyn Fn() -> AccessorResult<Labels> + Send + Sync>;

/// Returns a single identifier (tenant id, correlation id)
pub type GetIdFn = Arc<dyn Fn() -> AccessorResult<String> + Send + Sync>;

/// Accessors bound into a formatter
///
/// # Example
///
/// ```
/// use cloudrun_logger::{EnrichmentOptions, TraceContext};
///
/// let options = EnrichmentOptions::new()
///     .with_trace(|| Ok(Some(TraceContext::new("trace-1", "span-1"))))
///     .with_tenant_id(|| Ok("acme".to_string()));
///
/// assert!(options.has_trace());
/// assert!(options.has_labels());
/// ```
#[derive(Clone, Default)]
pub struct EnrichmentOptions {
    get_trace: Option<GetTraceFn>,
    get_labels: Option<GetLabelsFn>,
    get_tenant_id: Option<GetIdFn>,
    get_correlation_id: Option<GetIdFn>,
}

impl EnrichmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trace<F>(mut self, get_trace: F) -> Self
    where
        F: Fn() -> AccessorResult<Option<TraceContext>> + Send + Sync + 'static,
    {
        self.get_trace = Some(Arc::new(get_trace));
        self
    }

    #[must_use]
    pub fn with_labels<F>(mut self, get_labels: F) -> Self
    where
        F: Fn() -> AccessorResult<Labels> + Send + Sync + 'static,
    {
        self.get_labels = Some(Arc::new(get_labels));
        self
    }

    /// Use an already shared labels accessor, e.g. [`LabelStore::accessor`](super::LabelStore::accessor)
    #[must_use]
    pub fn with_labels_fn(mut self, get_labels: GetLabelsFn) -> Self {
        self.get_labels = Some(get_labels);
        self
    }

    #[must_use]
    pub fn with_tenant_id<F>(mut self, get_tenant_id: F) -> Self
    where
        F: Fn() -> AccessorResult<String> + Send + Sync + 'static,
    {
        self.get_tenant_id = Some(Arc::new(get_tenant_id));
        self
    }

    #[must_use]
    pub fn with_correlation_id<F>(mut self, get_correlation_id: F) -> Self
    where
        F: Fn() -> AccessorResult<String> + Send + Sync + 'static,
    {
        self.get_correlation_id = Some(Arc::new(get_correlation_id));
        self
    }

    pub fn has_trace(&self) -> bool {
        self.get_trace.is_some()
    }

    /// Whether any labels-producing accessor is configured
    pub fn has_labels(&self) -> bool {
        self.get_labels.is_some() || self.get_tenant_id.is_some() || self.get_correlation_id.is_some()
    }

    pub(crate) fn resolve_trace(&self) -> Result<Option<TraceContext>> {
        match &self.get_trace {
            Some(get_trace) => get_trace().map_err(|e| LoggerError::accessor("getTrace", e)),
            None => Ok(None),
        }
    }

    /// Evaluate the label accessors; `None` when none is configured
    ///
    /// Explicit labels come first, then `Tenant-Id`, then `Correlation-Id`.
    pub(crate) fn resolve_labels(&self) -> Result<Option<Labels>> {
        if !self.has_labels() {
            return Ok(None);
        }

        let mut labels = match &self.get_labels {
            Some(get_labels) => get_labels().map_err(|e| LoggerError::accessor("getLabels", e))?,
            None => Labels::new(),
        };

        if let Some(get_tenant_id) = &self.get_tenant_id {
            let tenant_id = get_tenant_id().map_err(|e| LoggerError::accessor("getTenantId", e))?;
            labels.insert(TENANT_ID_LABEL.to_string(), tenant_id);
        }

        if let Some(get_correlation_id) = &self.get_correlation_id {
            let correlation_id =
                get_correlation_id().map_err(|e| LoggerError::accessor("getCorrelationId", e))?;
            labels.insert(CORRELATION_ID_LABEL.to_string(), correlation_id);
        }

        Ok(Some(labels))
    }
}

impl fmt::Debug for EnrichmentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentOptions")
            .field("get_trace", &self.get_trace.is_some())
            .field("get_labels", &self.get_labels.is_some())
            .field("get_tenant_id", &self.get_tenant_id.is_some())
            .field("get_correlation_id", &self.get_correlation_id.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_nothing_configured() {
        let options = EnrichmentOptions::new();
        assert!(!options.has_trace());
        assert!(!options.has_labels());
        assert_eq!(options.resolve_trace().unwrap(), None);
        assert_eq!(options.resolve_labels().unwrap(), None);
    }

    #[test]
    fn test_labels_synthesized_in_order() {
        let options = EnrichmentOptions::new()
            .with_correlation_id(|| Ok("def".to_string()))
            .with_tenant_id(|| Ok("abc".to_string()))
            .with_labels(|| {
                let mut labels = Labels::new();
                labels.insert("team".to_string(), "payments".to_string());
                Ok(labels)
            });

        let labels = options.resolve_labels().unwrap().unwrap();
        let keys: Vec<&str> = labels.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["team", TENANT_ID_LABEL, CORRELATION_ID_LABEL]);
    }

    #[test]
    fn test_synthesized_label_overrides_explicit() {
        let options = EnrichmentOptions::new()
            .with_labels(|| {
                let mut labels = Labels::new();
                labels.insert(TENANT_ID_LABEL.to_string(), "stale".to_string());
                Ok(labels)
            })
            .with_tenant_id(|| Ok("fresh".to_string()));

        let labels = options.resolve_labels().unwrap().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[TENANT_ID_LABEL], "fresh");
    }

    #[test]
    fn test_accessor_failure_names_accessor() {
        let options = EnrichmentOptions::new().with_tenant_id(|| Err("no tenant bound".into()));

        let err = options.resolve_labels().unwrap_err();
        assert!(matches!(err, LoggerError::Accessor { accessor: "getTenantId", .. }));
    }

    #[test]
    fn test_accessors_called_on_every_resolve() {
        let calls = Arc::new(AtomicU64::new(0));
        let calls_clone = Arc::clone(&calls);
        let options = EnrichmentOptions::new().with_trace(move || {
            let n = calls_clone.fetch_add(1, Ordering::Relaxed);
            Ok(Some(TraceContext::new(format!("trace-{}", n), "span")))
        });

        let first = options.resolve_trace().unwrap().unwrap();
        let second = options.resolve_trace().unwrap().unwrap();
        assert_eq!(first.trace_id, "trace-0");
        assert_eq!(second.trace_id, "trace-1");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_debug_does_not_require_debug_closures() {
        let options = EnrichmentOptions::new().with_trace(|| Ok(None));
        let debug = format!("{:?}", options);
        assert!(debug.contains("get_trace: true"));
        assert!(debug.contains("get_labels: false"));
    }
}

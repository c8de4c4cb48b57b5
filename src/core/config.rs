//! Cloud Run logger configuration
//!
//! `build_config` turns a [`CloudRunConfig`] into everything a logging
//! facility needs: the minimum level, a bound formatter and the console sink.

use super::appender::Appender;
use super::enrichment::{AccessorResult, EnrichmentOptions};
use super::formatter::CloudLoggingFormatter;
use super::labels::{LabelStore, Labels};
use super::log_level::{select_level, LogLevel};
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use super::trace_context::TraceContext;
use crate::appenders::ConsoleAppender;

/// Configuration consumed once by [`build_config`]
///
/// # Example
///
/// ```
/// use cloudrun_logger::{build_config, CloudRunConfig, LogLevel};
///
/// let options = build_config(
///     CloudRunConfig::new(true).with_tenant_id(|| Ok("acme".to_string())),
/// );
/// assert_eq!(options.level, LogLevel::Info);
/// assert_eq!(options.sinks.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CloudRunConfig {
    pub production: bool,
    pub enrichment: EnrichmentOptions,
    pub timestamp_format: TimestampFormat,
}

impl CloudRunConfig {
    pub fn new(production: bool) -> Self {
        Self {
            production,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trace<F>(mut self, get_trace: F) -> Self
    where
        F: Fn() -> AccessorResult<Option<TraceContext>> + Send + Sync + 'static,
    {
        self.enrichment = self.enrichment.with_trace(get_trace);
        self
    }

    #[must_use]
    pub fn with_labels<F>(mut self, get_labels: F) -> Self
    where
        F: Fn() -> AccessorResult<Labels> + Send + Sync + 'static,
    {
        self.enrichment = self.enrichment.with_labels(get_labels);
        self
    }

    /// Read labels from a shared [`LabelStore`] on every record
    #[must_use]
    pub fn with_label_store(mut self, store: &LabelStore) -> Self {
        self.enrichment = self.enrichment.with_labels_fn(store.accessor());
        self
    }

    #[must_use]
    pub fn with_tenant_id<F>(mut self, get_tenant_id: F) -> Self
    where
        F: Fn() -> AccessorResult<String> + Send + Sync + 'static,
    {
        self.enrichment = self.enrichment.with_tenant_id(get_tenant_id);
        self
    }

    #[must_use]
    pub fn with_correlation_id<F>(mut self, get_correlation_id: F) -> Self
    where
        F: Fn() -> AccessorResult<String> + Send + Sync + 'static,
    {
        self.enrichment = self.enrichment.with_correlation_id(get_correlation_id);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

/// Minimum level, formatter and sinks for a logging facility
pub struct LoggerOptions {
    pub level: LogLevel,
    pub formatter: CloudLoggingFormatter,
    pub sinks: Vec<Box<dyn Appender>>,
}

impl LoggerOptions {
    /// Assemble a [`Logger`] from these options
    pub fn into_logger(self) -> Logger {
        let mut builder = Logger::builder()
            .min_level(self.level)
            .formatter(self.formatter);
        for sink in self.sinks {
            builder = builder.boxed_appender(sink);
        }
        builder.build()
    }
}

/// Bind the level selector, a formatter and the stdout console sink
pub fn build_config(cfg: CloudRunConfig) -> LoggerOptions {
    let formatter =
        CloudLoggingFormatter::new(cfg.enrichment).with_timestamp_format(cfg.timestamp_format);

    LoggerOptions {
        level: select_level(cfg.production),
        formatter,
        sinks: vec![Box::new(ConsoleAppender::stdout())],
    }
}

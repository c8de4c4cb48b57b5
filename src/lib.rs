//! # Cloud Run Logger
//!
//! Structured logging for services running on Google Cloud Run.
//!
//! Records are reshaped into the JSON layout the Cloud Logging agent reads
//! from stdout: `level` becomes an upper-cased `severity`, a `time` stamp is
//! added, and trace identifiers and labels are attached when the matching
//! accessors are configured.
//!
//! ## Features
//!
//! - **Cloud Logging layout**: `severity`, `time`, trace and label keys
//! - **Per-record enrichment**: trace, labels, tenant and correlation accessors
//! - **Stage-aware level**: `info` in production, `debug` elsewhere
//! - **Thread Safe**: formatter and logger can be shared across threads
//!
//! ## Example
//!
//! ```
//! use cloudrun_logger::prelude::*;
//!
//! let logger = build_config(
//!     CloudRunConfig::new(true)
//!         .with_trace(|| Ok(Some(TraceContext::new("trace-1", "span-1")))),
//! )
//! .into_logger();
//!
//! logger.info("service started");
//! logger.debug("suppressed in production");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::ConsoleAppender;
    pub use crate::core::{
        build_config, select_level, AccessorResult, Appender, CloudLoggingFormatter,
        CloudRunConfig, EnrichmentOptions, ErrorPayload, FieldValue, Fields, FormattedRecord,
        LabelStore, Labels, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, LoggerOptions, Result, TimestampFormat, TraceContext,
    };
}

pub use appenders::ConsoleAppender;
pub use core::{
    build_config, select_level, AccessorError, AccessorResult, Appender, CloudLoggingFormatter,
    CloudRunConfig, EnrichmentOptions, ErrorPayload, FieldValue, Fields, FormattedRecord,
    GetIdFn, GetLabelsFn, GetTraceFn, LabelGuard, LabelStore, Labels, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerOptions, Result, TimestampFormat,
    TraceContext, CORRELATION_ID_LABEL, LABELS_KEY, SPAN_ID_KEY, TENANT_ID_LABEL, TRACE_KEY,
    TRACE_SAMPLED_KEY,
};

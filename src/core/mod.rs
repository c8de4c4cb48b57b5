//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod labels;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod trace_context;

pub use appender::Appender;
pub use config::{build_config, CloudRunConfig, LoggerOptions};
pub use enrichment::{AccessorResult, EnrichmentOptions, GetIdFn, GetLabelsFn, GetTraceFn};
pub use error::{AccessorError, LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::{
    CloudLoggingFormatter, FormattedRecord, LABELS_KEY, SEVERITY_FIELD, SPAN_ID_KEY,
    TIME_FIELD, TRACE_KEY, TRACE_SAMPLED_KEY,
};
pub use labels::{LabelGuard, LabelStore, Labels, CORRELATION_ID_LABEL, TENANT_ID_LABEL};
pub use log_level::{select_level, LogLevel};
pub use log_record::{ErrorPayload, LogRecord, LEVEL_FIELD, MESSAGE_FIELD, STACK_FIELD};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
pub use trace_context::TraceContext;

//! Cloud Logging record formatter
//!
//! Reshapes a [`LogRecord`] into the field layout the Cloud Logging agent
//! expects from a JSON line on stdout:
//!
//! ```text
//! {"message":"hello there","severity":"INFO","time":"2025-01-08T10:30:45.123Z"}
//! ```
//!
//! with the trace and label keys below added when the matching accessors are
//! configured. The key strings are a compatibility contract with the backend.

use super::enrichment::EnrichmentOptions;
use super::error::Result;
use super::fields::{FieldValue, Fields};
use super::log_record::{LogRecord, LEVEL_FIELD, MESSAGE_FIELD};
use super::timestamp::TimestampFormat;
use serde::Serialize;

pub const TRACE_KEY: &str = "logging.googleapis.com/trace";
pub const SPAN_ID_KEY: &str = "logging.googleapis.com/spanId";
pub const TRACE_SAMPLED_KEY: &str = "logging.googleapis.com/trace_sampled";
pub const LABELS_KEY: &str = "logging.googleapis.com/labels";

pub const SEVERITY_FIELD: &str = "severity";
pub const TIME_FIELD: &str = "time";

/// Output of the formatter, ready to be written as one JSON line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormattedRecord {
    fields: Fields,
}

impl FormattedRecord {
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn message(&self) -> Option<&str> {
        self.get(MESSAGE_FIELD).and_then(FieldValue::as_str)
    }

    pub fn severity(&self) -> Option<&str> {
        self.get(SEVERITY_FIELD).and_then(FieldValue::as_str)
    }

    pub fn time(&self) -> Option<&str> {
        self.get(TIME_FIELD).and_then(FieldValue::as_str)
    }

    /// Serialize to a single line of JSON (no trailing newline)
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.fields.to_json_map())
    }
}

/// Formatter bound to a set of enrichment accessors
///
/// Cheap to clone; accessors are shared behind `Arc`.
///
/// # Example
///
/// ```
/// use cloudrun_logger::{CloudLoggingFormatter, LogLevel, LogRecord};
///
/// let formatter = CloudLoggingFormatter::default();
/// let record = formatter
///     .format(LogRecord::new(LogLevel::Info, "hello there"))
///     .unwrap();
///
/// assert_eq!(record.severity(), Some("INFO"));
/// assert!(record.get("level").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CloudLoggingFormatter {
    options: EnrichmentOptions,
    timestamp_format: TimestampFormat,
}

impl CloudLoggingFormatter {
    pub fn new(options: EnrichmentOptions) -> Self {
        Self {
            options,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn options(&self) -> &EnrichmentOptions {
        &self.options
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format
    }

    /// Transform one record
    ///
    /// Accessors run on every call. If one fails, the error is returned and
    /// no record is produced.
    pub fn format(&self, mut record: LogRecord) -> Result<FormattedRecord> {
        record.materialize_error();

        let LogRecord {
            level,
            message,
            mut fields,
            ..
        } = record;
        // the record's own message always wins over an extra `message` field
        fields.remove(LEVEL_FIELD);
        fields.remove(MESSAGE_FIELD);

        let mut out = Fields::new().with_field(MESSAGE_FIELD, message);
        out.extend(fields);

        if let Some(trace) = self.options.resolve_trace()? {
            let sampled = trace.sampled();
            out.add_field(TRACE_KEY, trace.trace_id);
            out.add_field(SPAN_ID_KEY, trace.span_id);
            out.add_field(TRACE_SAMPLED_KEY, sampled);
        }

        if let Some(labels) = self.options.resolve_labels()? {
            let labels: Fields = labels.into_iter().collect();
            out.add_field(LABELS_KEY, labels);
        }

        out.add_field(SEVERITY_FIELD, level.to_str());
        out.add_field(TIME_FIELD, self.timestamp_format.now());

        Ok(FormattedRecord { fields: out })
    }

    /// Transform one record and serialize it to a JSON line
    pub fn format_line(&self, record: LogRecord) -> Result<String> {
        self.format(record)?.to_json_line()
    }
}

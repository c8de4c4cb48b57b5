//! Log record structure

use super::error::{LoggerError, Result};
use super::fields::{FieldValue, Fields};
use super::log_level::LogLevel;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// Name of the severity field of an input record
pub const LEVEL_FIELD: &str = "level";
/// Name of the message field
pub const MESSAGE_FIELD: &str = "message";
/// Field an attached error's stack text is rendered into
pub const STACK_FIELD: &str = "stack";

/// Error attached to a record, rendered as plain string data when formatted
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Capture an error together with its chain of sources
    ///
    /// The stack text starts with the error itself, followed by one
    /// `Caused by:` line per source, then the current backtrace when
    /// `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE` enable it.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut stack = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\nCaused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            stack: Some(stack),
        }
        .capture_backtrace()
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Append the current backtrace, when backtraces are enabled for the process
    pub fn capture_backtrace(self) -> Self {
        self.with_backtrace(&Backtrace::capture())
    }

    /// Append a backtrace to the stack text; disabled or unsupported ones are ignored
    pub fn with_backtrace(mut self, backtrace: &Backtrace) -> Self {
        if backtrace.status() == BacktraceStatus::Captured {
            let trace = backtrace.to_string();
            self.stack = Some(match self.stack.take() {
                Some(stack) => format!("{}\n{}", stack, trace),
                None => trace,
            });
        }
        self
    }
}

/// A raw log record: severity, message and an open-ended bag of fields
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub fields: Fields,
    pub error: Option<ErrorPayload>,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Fields::new(),
            error: None,
        }
    }

    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_error(mut self, error: ErrorPayload) -> Self {
        self.error = Some(error);
        self
    }

    /// Build a record from a JSON object
    ///
    /// `level` and `message` are required; every other key is kept as an
    /// extra field.
    pub fn from_json_map(mut map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let level = match map.remove(LEVEL_FIELD) {
            Some(serde_json::Value::String(name)) => name
                .parse::<LogLevel>()
                .map_err(|_| LoggerError::InvalidLevel(name))?,
            Some(other) => {
                return Err(LoggerError::invalid_field(
                    LEVEL_FIELD,
                    format!("expected a string, got {}", other),
                ))
            }
            None => return Err(LoggerError::missing_field(LEVEL_FIELD)),
        };

        let message = match map.remove(MESSAGE_FIELD) {
            Some(serde_json::Value::String(message)) => message,
            Some(other) => {
                return Err(LoggerError::invalid_field(
                    MESSAGE_FIELD,
                    format!("expected a string, got {}", other),
                ))
            }
            None => return Err(LoggerError::missing_field(MESSAGE_FIELD)),
        };

        Ok(Self {
            level,
            message,
            fields: Fields::from(map),
            error: None,
        })
    }

    /// Parse a record from a JSON object string
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str(json)? {
            serde_json::Value::Object(map) => Self::from_json_map(map),
            other => Err(LoggerError::invalid_field(
                "record",
                format!("expected a JSON object, got {}", other),
            )),
        }
    }

    /// Render the attached error, if any, into plain fields
    ///
    /// The stack text lands in the `stack` field (falling back to the error
    /// message when no stack was captured); an empty record message is
    /// replaced by the error message.
    pub fn materialize_error(&mut self) {
        if let Some(error) = self.error.take() {
            if self.message.is_empty() {
                self.message = error.message.clone();
            }
            let stack = error.stack.unwrap_or(error.message);
            self.fields.add_field(STACK_FIELD, stack);
        }
    }
}

//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Error returned by a caller-supplied accessor (trace, labels, tenant id, ...)
pub type AccessorError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Required field absent from an input record
    #[error("Log record is missing required field '{field}'")]
    MissingField { field: String },

    /// Field present but of the wrong shape
    #[error("Invalid value for field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Unrecognized severity name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// An enrichment accessor failed while formatting a record
    #[error("Accessor {accessor} failed: {source}")]
    Accessor {
        accessor: &'static str,
        #[source]
        source: AccessorError,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        LoggerError::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an accessor failure
    pub fn accessor(accessor: &'static str, source: AccessorError) -> Self {
        LoggerError::Accessor { accessor, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::missing_field("level");
        assert!(matches!(err, LoggerError::MissingField { .. }));

        let err = LoggerError::invalid_field("message", "expected a string");
        assert!(matches!(err, LoggerError::InvalidField { .. }));

        let err = LoggerError::accessor("getTrace", "no active span".into());
        assert!(matches!(err, LoggerError::Accessor { accessor: "getTrace", .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::missing_field("level");
        assert_eq!(
            err.to_string(),
            "Log record is missing required field 'level'"
        );

        let err = LoggerError::InvalidLevel("loud".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'loud'");

        let err = LoggerError::accessor("getLabels", "store poisoned".into());
        assert_eq!(err.to_string(), "Accessor getLabels failed: store poisoned");
    }

    #[test]
    fn test_accessor_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "lookup failed");
        let err = LoggerError::accessor("getTenantId", Box::new(io_err));

        let source = err.source().expect("accessor error has a source");
        assert_eq!(source.to_string(), "lookup failed");
    }
}

//! Main logger implementation
//!
//! The logger is the host side of the formatter: it drops records below the
//! minimum level, formats the rest once each and hands the result to every
//! appender.

use super::{
    appender::Appender,
    error::Result,
    fields::Fields,
    formatter::{CloudLoggingFormatter, FormattedRecord},
    log_level::LogLevel,
    log_record::{ErrorPayload, LogRecord},
    metrics::LoggerMetrics,
};
use parking_lot::{Mutex, RwLock};
use std::error::Error;
use std::sync::Arc;

pub struct Logger {
    min_level: RwLock<LogLevel>,
    formatter: CloudLoggingFormatter,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
    /// Metrics for observability (dropped count, total logged, etc.)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_formatter(CloudLoggingFormatter::default())
    }

    #[must_use]
    pub fn with_formatter(formatter: CloudLoggingFormatter) -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            formatter,
            appenders: Mutex::new(Vec::new()),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Hand a formatted record to every appender
    ///
    /// **Per-Appender Panic Isolation**: each appender is wrapped in
    /// catch_unwind so a single failing appender does not keep the record
    /// from the others. Returns `true` when any appender failed.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        record: &FormattedRecord,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(&*panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.appenders.get_mut().push(appender);
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    pub fn formatter(&self) -> &CloudLoggingFormatter {
        &self.formatter
    }

    /// Filter, format and emit a record, propagating format failures
    ///
    /// Returns `Ok(false)` when the record is below the minimum level. An
    /// accessor failure is returned as-is and nothing is emitted.
    pub fn try_log(&self, record: LogRecord) -> Result<bool> {
        if !self.is_enabled(record.level) {
            self.metrics.record_filtered();
            return Ok(false);
        }

        let formatted = match self.formatter.format(record) {
            Ok(formatted) => formatted,
            Err(e) => {
                self.metrics.record_format_failure();
                self.metrics.record_dropped();
                return Err(e);
            }
        };

        let mut appenders = self.appenders.lock();
        Self::process_sync(&mut appenders, &formatted, &self.metrics);
        Ok(true)
    }

    /// Filter, format and emit a record
    ///
    /// Format failures are reported on stderr and counted in the metrics.
    pub fn log_record(&self, record: LogRecord) {
        if let Err(e) = self.try_log(record) {
            eprintln!("[LOGGER ERROR] Failed to format log record: {}", e);
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        self.log_record(LogRecord::new(level, message));
    }

    /// Log with structured fields
    pub fn log_with_fields(&self, level: LogLevel, message: impl Into<String>, fields: Fields) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        self.log_record(LogRecord::new(level, message).with_fields(fields));
    }

    /// Log an error together with its chain of causes
    pub fn log_error(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        error: &(dyn Error + 'static),
    ) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        self.log_record(LogRecord::new(level, message).with_error(ErrorPayload::from_error(error)));
    }

    /// Get the number of dropped logs
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use cloudrun_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::stdout())
///     .build();
/// assert_eq!(logger.min_level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    formatter: CloudLoggingFormatter,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            formatter: CloudLoggingFormatter::default(),
            appenders: Vec::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the record formatter
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: CloudLoggingFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add an already boxed appender
    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut logger = Logger::with_formatter(self.formatter);
        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

//! Console appender implementation
//!
//! Writes each formatted record as one JSON line (JSONL), which is what the
//! Cloud Run logging agent picks up from stdout.

use crate::core::{Appender, FormattedRecord, Result};
use std::io::{self, Write};

pub struct ConsoleAppender {
    writer: Box<dyn Write + Send>,
}

impl ConsoleAppender {
    /// Appender writing to the process' standard output
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout()),
        }
    }

    /// Appender writing to an arbitrary writer
    ///
    /// # Example
    ///
    /// ```
    /// use cloudrun_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(std::io::sink());
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &FormattedRecord) -> Result<()> {
        let line = record.to_json_line()?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CloudLoggingFormatter, LogLevel, LogRecord};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_appender_writes_json_lines() -> Result<()> {
        let buffer = SharedBuffer::default();
        let mut appender = ConsoleAppender::with_writer(buffer.clone());
        let formatter = CloudLoggingFormatter::default();

        for i in 0..3 {
            let record = formatter.format(
                LogRecord::new(LogLevel::Debug, format!("Iteration {}", i)).with_field("iteration", i),
            )?;
            appender.append(&record)?;
        }
        appender.flush()?;

        let content = String::from_utf8(buffer.0.lock().clone()).expect("utf8 output");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        for (i, line) in lines.iter().enumerate() {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert_eq!(parsed["message"], format!("Iteration {}", i));
            assert_eq!(parsed["severity"], "DEBUG");
            assert_eq!(parsed["iteration"], i as i64);
            assert!(parsed.get("level").is_none());
        }

        Ok(())
    }

    #[test]
    fn test_console_appender_name() {
        assert_eq!(ConsoleAppender::default().name(), "console");
    }
}

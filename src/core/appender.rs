//! Appender trait for log output destinations

use super::{error::Result, formatter::FormattedRecord};

pub trait Appender: Send {
    fn append(&mut self, record: &FormattedRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

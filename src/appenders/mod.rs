//! Appender implementations

pub mod console;

pub use console::ConsoleAppender;

// Re-export the trait for backward compatibility
pub use crate::core::Appender;

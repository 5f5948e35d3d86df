//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console output
//! - Optional JSON log files with rotation via tracing-appender

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};

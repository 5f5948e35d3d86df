//! Infrastructure layer module
//!
//! Process-level concerns shared by the server and the CLI:
//! - Configuration management (figment: defaults, YAML, environment)
//! - Logging infrastructure (tracing-subscriber, tracing-appender)

pub mod config;
pub mod logging;

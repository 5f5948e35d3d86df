//! CLI output formatting module
//!
//! Provides table formatters for terminal display.

pub mod table;

pub use table::TableFormatter;

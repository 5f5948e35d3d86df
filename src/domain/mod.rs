//! Domain layer for the Triage prioritization engine
//!
//! This module contains the task model, graph and scoring types, and the
//! ports through which services reach shared state.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult, ValidationError, ValidationIssue};

//! Triage - task prioritization engine
//!
//! Triage scores a batch of tasks on deadline urgency, importance, effort,
//! and position in the batch's dependency graph, ranks them, classifies
//! each into an Eisenhower quadrant, and suggests up to three tasks to do
//! next. Accept/reject feedback on suggestions tunes the shared weights
//! used by later requests.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Task model, graph, weights, errors, ports
//! - **Service Layer** (`services`): Scoring, ranking, feedback, and the
//!   request facade
//! - **Adapters** (`adapters`): HTTP surface and in-memory learning state
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use triage::{Config, PrioritizationService};
//!
//! let service = PrioritizationService::from_config(&Config::default());
//! let batch = vec![
//!     json!({"id": "1", "title": "Fix login bug", "importance": 9}),
//!     json!({"id": "2", "title": "Tidy README", "importance": 2}),
//! ];
//!
//! let analysis = service.analyze(&batch, Some("balanced"), None).unwrap();
//! assert_eq!(analysis.tasks[0].id, "1");
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult, ValidationError};
pub use domain::models::{
    Component, Config, Quadrant, ScoredTask, Strategy, Suggestion, Task, WeightOverride,
    WeightVector,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Analysis, PrioritizationService, SuggestionSet};

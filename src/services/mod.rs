//! Scoring, ranking, and feedback services
//!
//! The services are synchronous and stateless apart from the shared
//! learning state reached through ports. `PrioritizationService` is the
//! entry point used by the HTTP and CLI surfaces.

pub mod calendar;
pub mod dependency_resolver;
pub mod feedback;
pub mod priority_calculator;
pub mod prioritization_service;
pub mod ranking;

pub use calendar::WorkingCalendar;
pub use dependency_resolver::DependencyResolver;
pub use feedback::{FeedbackAdapter, FeedbackOutcome};
pub use priority_calculator::PriorityCalculator;
pub use prioritization_service::{
    Analysis, GraphNode, GraphView, PrioritizationService, SuggestionSet,
};
pub use ranking::{rank_tasks, SuggestionSelector, SUGGESTION_LIMIT};

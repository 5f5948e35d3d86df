//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - Clock: the evaluation date used for deadline urgency
//! - WeightRepository: the shared, feedback-adjusted weight vector
//! - SuggestionLedger: component profiles of recently suggested tasks
//!
//! Services depend on these traits only, so tests can inject a fresh
//! instance per case.

pub mod clock;
pub mod suggestion_ledger;
pub mod weight_repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use suggestion_ledger::SuggestionLedger;
pub use weight_repository::WeightRepository;

//! In-process adapters for the shared learning state.
//!
//! Persistence is out of scope: both stores live for the lifetime of the
//! process and start from configuration on every restart.

pub mod suggestion_ledger;
pub mod weight_store;

pub use suggestion_ledger::InMemorySuggestionLedger;
pub use weight_store::InMemoryWeightRepository;

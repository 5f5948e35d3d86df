//! Bounded memory of suggested task profiles.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use crate::domain::models::ComponentScores;
use crate::domain::ports::SuggestionLedger;

#[derive(Debug, Default)]
struct LedgerState {
    profiles: HashMap<String, ComponentScores>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
}

/// Keeps the most recent `capacity` suggestions; the oldest is evicted first.
#[derive(Debug)]
pub struct InMemorySuggestionLedger {
    capacity: usize,
    state: Mutex<LedgerState>,
}

impl InMemorySuggestionLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LedgerState::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .profiles
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SuggestionLedger for InMemorySuggestionLedger {
    fn record(&self, task_id: &str, profile: ComponentScores) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.profiles.insert(task_id.to_string(), profile).is_some() {
            state.order.retain(|id| id != task_id);
        }
        state.order.push_back(task_id.to_string());

        while state.order.len() > self.capacity {
            if let Some(evicted) = state.order.pop_front() {
                state.profiles.remove(&evicted);
            }
        }
    }

    fn lookup(&self, task_ids: &[String]) -> Vec<ComponentScores> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        task_ids
            .iter()
            .filter_map(|id| state.profiles.get(id).copied())
            .collect()
    }
}

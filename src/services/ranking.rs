use std::cmp::Ordering;

use crate::domain::models::{ScoredTask, Suggestion};

/// Largest number of suggestions ever returned
pub const SUGGESTION_LIMIT: usize = 3;

/// Sort scored tasks for the analyze response.
///
/// Score descending; ties go to the earlier due date (dated before
/// undated), then to insertion order. The input must be in insertion
/// order; the sort is stable.
pub fn rank_tasks(mut tasks: Vec<ScoredTask>) -> Vec<ScoredTask> {
    tasks.sort_by(compare_ranked);
    tasks
}

fn compare_ranked(a: &ScoredTask, b: &ScoredTask) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Picks the top ready tasks and explains each pick
#[derive(Debug, Clone)]
pub struct SuggestionSelector {
    limit: usize,
}

impl Default for SuggestionSelector {
    fn default() -> Self {
        Self::new(SUGGESTION_LIMIT)
    }
}

impl SuggestionSelector {
    /// `limit` is capped at [`SUGGESTION_LIMIT`]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.min(SUGGESTION_LIMIT),
        }
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Select suggestions from an already ranked list
    pub fn select(&self, ranked: &[ScoredTask]) -> Vec<Suggestion> {
        ranked
            .iter()
            .filter(|task| task.ready)
            .take(self.limit)
            .map(|task| Suggestion {
                explanation: explain(task),
                task: task.clone(),
            })
            .collect()
    }
}

/// Human-readable summary of why a task was suggested
pub fn explain(task: &ScoredTask) -> String {
    let readiness = if task.dependencies.is_empty() {
        "ready to start"
    } else {
        "ready to start, its prerequisites are outside this batch"
    };

    format!(
        "Score {:.3} in the {} quadrant, {readiness}: {}",
        task.score, task.matrix, task.reason
    )
}

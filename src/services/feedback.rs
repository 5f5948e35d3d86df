//! Feedback-driven adjustment of the shared scoring weights.
//!
//! Helpful feedback reinforces the weight that contributed most to the
//! suggested tasks' scores; unhelpful feedback decays it. Weights are
//! renormalized to sum to 1 after every adjustment. The weights are
//! process-wide: feedback from any caller affects every later request.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::{Component, ComponentScores, LearningConfig, WeightVector};
use crate::domain::ports::{SuggestionLedger, WeightRepository};

/// Result of applying one feedback signal
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackOutcome {
    /// Components whose weight was adjusted
    pub adjusted: Vec<Component>,
    /// Number of selected IDs with a recorded profile
    pub matched: usize,
    pub weights: WeightVector,
}

pub struct FeedbackAdapter {
    weights: Arc<dyn WeightRepository>,
    ledger: Arc<dyn SuggestionLedger>,
    config: LearningConfig,
}

impl FeedbackAdapter {
    pub fn new(
        weights: Arc<dyn WeightRepository>,
        ledger: Arc<dyn SuggestionLedger>,
        config: LearningConfig,
    ) -> Self {
        Self {
            weights,
            ledger,
            config,
        }
    }

    /// Apply one accept/reject signal for previously suggested tasks
    pub fn apply(&self, selected: &[String], helpful: bool) -> FeedbackOutcome {
        let profiles = self.ledger.lookup(selected);
        let matched = profiles.len();
        let profile = ComponentScores::mean(&profiles);

        let step = self.config.step;
        let floor = self.config.floor;

        // The component choice reads the same weights it adjusts, so both
        // happen under one write.
        let mut adjusted = Vec::new();
        let updated = self.weights.modify(&mut |current| {
            adjusted = target_components(&current, profile.as_ref());
            adjust(current, &adjusted, helpful, step, floor)
        });

        info!(
            helpful,
            selected = selected.len(),
            matched,
            adjusted = ?adjusted,
            "feedback applied"
        );
        debug!(weights = ?updated, "weights after feedback");

        FeedbackOutcome {
            adjusted,
            matched,
            weights: updated,
        }
    }
}

/// Components to adjust for a feedback signal.
///
/// With a known profile: the single component with the largest weighted
/// contribution `weight × profile`. Without one: urgency and importance.
pub fn target_components(
    weights: &WeightVector,
    profile: Option<&ComponentScores>,
) -> Vec<Component> {
    let Some(profile) = profile else {
        return vec![Component::Urgency, Component::Importance];
    };

    let mut best = Component::Urgency;
    let mut best_value = f64::NEG_INFINITY;
    for component in Component::ALL {
        let value = weights.get(component) * profile.get(component);
        if value > best_value {
            best = component;
            best_value = value;
        }
    }
    vec![best]
}

/// Reinforce or decay `targets` by `step`, then renormalize.
///
/// Decay never takes a weight below `floor`, and leaves a weight that is
/// already at or below the floor untouched.
pub fn adjust(
    mut weights: WeightVector,
    targets: &[Component],
    helpful: bool,
    step: f64,
    floor: f64,
) -> WeightVector {
    for &component in targets {
        let current = weights.get(component);
        let next = if helpful {
            current + step
        } else if current > floor {
            (current - step).max(floor)
        } else {
            current
        };
        weights.set(component, next);
    }
    weights.normalized()
}

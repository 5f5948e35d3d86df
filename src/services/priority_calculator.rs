use chrono::NaiveDate;
use tracing::debug;

use crate::domain::models::{
    Component, ComponentScores, DependencyGraph, EngineConfig, NodePosition, Quadrant, ScoredTask,
    Task, WeightVector,
};
use crate::services::calendar::WorkingCalendar;

/// Urgency of a task without a deadline
pub const NEUTRAL_URGENCY: f64 = 0.5;

/// Graph component of a task that neither blocks nor waits
pub const NEUTRAL_GRAPH_POSITION: f64 = 0.5;

/// Service for calculating task priority scores
///
/// Score formula: `Σ wᵢ·cᵢ / Σ wᵢ` over the urgency, importance, effort and
/// graph-position components, clamped to `[0, 1]` and rounded.
#[derive(Debug, Clone, Default)]
pub struct PriorityCalculator {
    engine: EngineConfig,
    calendar: WorkingCalendar,
}

impl PriorityCalculator {
    /// Create a priority calculator with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a priority calculator with custom parameters
    pub const fn with_config(engine: EngineConfig, calendar: WorkingCalendar) -> Self {
        Self { engine, calendar }
    }

    /// Deadline pressure in `[0, 1]`
    ///
    /// - No deadline: neutral urgency
    /// - Past deadline: maximum urgency
    /// - Otherwise falls linearly with the working days left, reaching zero
    ///   at the configured horizon
    pub fn urgency(&self, due_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
        let Some(due) = due_date else {
            return NEUTRAL_URGENCY;
        };
        if due < today {
            return 1.0;
        }

        let horizon = self.engine.urgency_horizon_days;
        if horizon <= 0.0 {
            return 1.0;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cap = horizon.ceil() as u32;
        let days_left = self.calendar.working_days_between(today, due, cap);
        (1.0 - f64::from(days_left) / horizon).clamp(0.0, 1.0)
    }

    pub fn importance(&self, importance: u8) -> f64 {
        (f64::from(importance) / 10.0).clamp(0.0, 1.0)
    }

    /// Quick-win credit: 1 for effortless tasks, 0 at or above the cap
    pub fn effort(&self, estimated_hours: f64) -> f64 {
        let cap = self.engine.effort_cap_hours;
        if cap <= 0.0 || !estimated_hours.is_finite() {
            return 0.0;
        }
        (1.0 - estimated_hours.clamp(0.0, cap) / cap).clamp(0.0, 1.0)
    }

    /// Bonus for unblocking other tasks, penalty for not being actionable yet
    pub fn graph_position(&self, position: NodePosition) -> f64 {
        let saturation = self.engine.blocker_saturation.max(1);
        let mut value = NEUTRAL_GRAPH_POSITION;

        if position.blocks > 0 {
            let share = position.blocks.min(saturation) as f64 / saturation as f64;
            value += 0.5 * share;
        }
        if position.waiting_on > 0 || position.in_cycle {
            value -= 0.5;
        }
        value.clamp(0.0, 1.0)
    }

    pub fn components(
        &self,
        task: &Task,
        position: NodePosition,
        today: NaiveDate,
    ) -> ComponentScores {
        ComponentScores {
            urgency: self.urgency(task.due_date, today),
            importance: self.importance(task.importance),
            effort: self.effort(task.estimated_hours),
            graph: self.graph_position(position),
        }
    }

    /// Weighted, normalized, clamped and rounded score
    pub fn combine(&self, components: &ComponentScores, weights: &WeightVector) -> f64 {
        let total = weights.sum();
        if total <= 0.0 || !total.is_finite() {
            return 0.0;
        }

        let weighted: f64 = Component::ALL
            .iter()
            .map(|&c| weights.get(c) * components.get(c))
            .sum();
        let score = (weighted / total).clamp(0.0, 1.0);

        let precision = i32::try_from(self.engine.score_precision).unwrap_or(i32::MAX).min(12);
        let factor = 10f64.powi(precision);
        (score * factor).round() / factor
    }

    pub fn classify(&self, components: &ComponentScores) -> Quadrant {
        Quadrant::classify(
            components.urgency >= self.engine.urgent_threshold,
            components.importance >= self.engine.important_threshold,
        )
    }

    /// Short justification citing the dominant weighted component(s)
    pub fn explain(
        &self,
        task: &Task,
        components: &ComponentScores,
        position: NodePosition,
        weights: &WeightVector,
        today: NaiveDate,
    ) -> String {
        let mut ranked: Vec<(Component, f64)> = Component::ALL
            .iter()
            .map(|&c| (c, weights.get(c) * components.get(c)))
            .collect();
        // Stable sort keeps Component::ALL order on ties
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let phrase = |component: Component| match component {
            Component::Urgency => urgency_phrase(task.due_date, components.urgency, today),
            Component::Importance => importance_phrase(components.importance).to_string(),
            Component::Effort => effort_phrase(components.effort).to_string(),
            Component::Graph => graph_phrase(position),
        };

        let (top, top_value) = ranked[0];
        let mut cited = vec![top];
        let mut reason = phrase(top);

        let (second, second_value) = ranked[1];
        if second_value > 0.0 && second_value >= 0.75 * top_value {
            cited.push(second);
            reason.push_str(" and ");
            reason.push_str(&phrase(second));
        }

        let notable_graph = position.in_cycle || position.waiting_on > 0 || position.blocks > 0;
        if notable_graph && !cited.contains(&Component::Graph) {
            reason.push_str("; ");
            reason.push_str(&graph_phrase(position));
        }

        reason
    }

    /// Score one task at its position in the graph
    pub fn score(
        &self,
        task: &Task,
        position: NodePosition,
        weights: &WeightVector,
        today: NaiveDate,
    ) -> ScoredTask {
        let components = self.components(task, position, today);
        let score = self.combine(&components, weights);
        let matrix = self.classify(&components);
        let reason = self.explain(task, &components, position, weights, today);

        ScoredTask::from_task(task, score, reason, matrix, components, position.is_ready())
    }

    /// Score every task of a batch, in insertion order
    ///
    /// `graph` must have been built from the same `tasks`.
    pub fn score_all(
        &self,
        tasks: &[Task],
        graph: &DependencyGraph,
        weights: &WeightVector,
        today: NaiveDate,
    ) -> Vec<ScoredTask> {
        let scored: Vec<ScoredTask> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| self.score(task, graph.position(i), weights, today))
            .collect();

        debug!(tasks = scored.len(), %today, "batch scored");
        scored
    }
}

fn urgency_phrase(due_date: Option<NaiveDate>, urgency: f64, today: NaiveDate) -> String {
    match due_date {
        None => "no deadline".to_string(),
        Some(due) if due < today => "overdue".to_string(),
        Some(due) if due == today => "due today".to_string(),
        Some(_) if urgency >= 0.7 => "due soon".to_string(),
        Some(_) if urgency >= 0.3 => "deadline approaching".to_string(),
        Some(_) => "deadline is distant".to_string(),
    }
}

fn importance_phrase(importance: f64) -> &'static str {
    if importance >= 0.8 {
        "high importance"
    } else if importance >= 0.5 {
        "moderate importance"
    } else {
        "low importance"
    }
}

fn effort_phrase(effort: f64) -> &'static str {
    if effort >= 0.75 {
        "low effort quick win"
    } else if effort >= 0.4 {
        "moderate effort"
    } else {
        "large effort"
    }
}

fn graph_phrase(position: NodePosition) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };

    if position.in_cycle {
        "part of a dependency cycle".to_string()
    } else if position.waiting_on > 0 {
        format!("waiting on {}", plural(position.waiting_on, "prerequisite"))
    } else if position.blocks > 0 {
        format!("unblocks {}", plural(position.blocks, "task"))
    } else {
        "independent task".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        // A Wednesday
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn standalone() -> NodePosition {
        NodePosition::default()
    }

    #[test]
    fn test_urgency_without_deadline_is_neutral() {
        let calc = PriorityCalculator::new();
        assert_eq!(calc.urgency(None, today()), NEUTRAL_URGENCY);
    }

    #[test]
    fn test_urgency_overdue_saturates() {
        let calc = PriorityCalculator::new();
        let due = today() - Duration::days(30);
        assert_eq!(calc.urgency(Some(due), today()), 1.0);
    }

    #[test]
    fn test_urgency_due_today_is_maximal() {
        let calc = PriorityCalculator::new();
        assert_eq!(calc.urgency(Some(today()), today()), 1.0);
    }

    #[test]
    fn test_urgency_counts_working_days() {
        let calc = PriorityCalculator::new();
        // Wednesday -> next Monday: Thu, Fri, Mon = 3 working days
        let due = today() + Duration::days(5);
        assert!((calc.urgency(Some(due), today()) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_urgency_far_future_is_zero() {
        let calc = PriorityCalculator::new();
        let due = today() + Duration::days(365);
        assert_eq!(calc.urgency(Some(due), today()), 0.0);
    }

    #[test]
    fn test_urgency_is_non_increasing_in_days_remaining() {
        let calc = PriorityCalculator::new();
        let mut previous = f64::INFINITY;
        for offset in -3..40 {
            let due = today() + Duration::days(offset);
            let urgency = calc.urgency(Some(due), today());
            assert!(urgency <= previous, "urgency rose at offset {offset}");
            assert!((0.0..=1.0).contains(&urgency));
            previous = urgency;
        }
    }

    #[test]
    fn test_importance_and_effort_components() {
        let calc = PriorityCalculator::new();
        assert_eq!(calc.importance(5), 0.5);
        assert_eq!(calc.importance(10), 1.0);
        assert_eq!(calc.importance(200), 1.0);
        assert_eq!(calc.effort(0.0), 1.0);
        assert_eq!(calc.effort(12.0), 0.0);
        assert_eq!(calc.effort(40.0), 0.0);
        assert!(calc.effort(1.0) > calc.effort(2.0));
    }

    #[test]
    fn test_graph_position_bonus_and_penalty() {
        let calc = PriorityCalculator::new();
        assert_eq!(calc.graph_position(standalone()), NEUTRAL_GRAPH_POSITION);

        let blocker = NodePosition {
            blocks: 2,
            ..NodePosition::default()
        };
        assert_eq!(calc.graph_position(blocker), 0.75);

        let saturated = NodePosition {
            blocks: 10,
            ..NodePosition::default()
        };
        assert_eq!(calc.graph_position(saturated), 1.0);

        let waiting = NodePosition {
            waiting_on: 1,
            ..NodePosition::default()
        };
        assert_eq!(calc.graph_position(waiting), 0.0);

        let cyclic = NodePosition {
            in_cycle: true,
            ..NodePosition::default()
        };
        assert_eq!(calc.graph_position(cyclic), 0.0);
    }

    #[test]
    fn test_neutral_task_baseline() {
        let calc = PriorityCalculator::new();
        let task = Task::new("1", "Baseline");
        let scored = calc.score(&task, standalone(), &WeightVector::default(), today());

        // 0.35*0.5 + 0.35*0.5 + 0.15*(11/12) + 0.15*0.5
        let expected = 0.35 * 0.5 + 0.35 * 0.5 + 0.15 * (11.0 / 12.0) + 0.15 * 0.5;
        assert!((scored.score - expected).abs() < 1e-3);
        assert_eq!(scored.matrix, Quadrant::UrgentImportant);
        assert!(scored.ready);
    }

    #[test]
    fn test_score_is_rounded_to_precision() {
        let calc = PriorityCalculator::new();
        let components = ComponentScores {
            urgency: 0.123_456,
            importance: 0.123_456,
            effort: 0.123_456,
            graph: 0.123_456,
        };
        assert_eq!(calc.combine(&components, &WeightVector::default()), 0.123);
    }

    #[test]
    fn test_combine_with_zero_weights_is_zero() {
        let calc = PriorityCalculator::new();
        let components = ComponentScores {
            urgency: 1.0,
            importance: 1.0,
            effort: 1.0,
            graph: 1.0,
        };
        assert_eq!(calc.combine(&components, &WeightVector::uniform(0.0)), 0.0);
    }

    #[test]
    fn test_matrix_classification() {
        let calc = PriorityCalculator::new();
        let task = Task::new("1", "Low")
            .with_importance(2)
            .with_due_date(today() + Duration::days(60));
        let scored = calc.score(&task, standalone(), &WeightVector::default(), today());
        assert_eq!(scored.matrix, Quadrant::NotUrgentNotImportant);

        let task = Task::new("2", "Crunch")
            .with_importance(9)
            .with_due_date(today());
        let scored = calc.score(&task, standalone(), &WeightVector::default(), today());
        assert_eq!(scored.matrix, Quadrant::UrgentImportant);
    }

    #[test]
    fn test_reason_cites_dominant_components() {
        let calc = PriorityCalculator::new();
        let task = Task::new("1", "Crunch")
            .with_importance(9)
            .with_estimated_hours(10.0)
            .with_due_date(today() + Duration::days(1));
        let scored = calc.score(&task, standalone(), &WeightVector::default(), today());
        assert_eq!(scored.reason, "due soon and high importance");
    }

    #[test]
    fn test_reason_mentions_quick_win() {
        let calc = PriorityCalculator::new();
        let task = Task::new("1", "Tiny")
            .with_importance(1)
            .with_estimated_hours(0.5)
            .with_due_date(today() + Duration::days(90));
        let weights = WeightVector::new(0.2, 0.2, 0.5, 0.1);
        let scored = calc.score(&task, standalone(), &weights, today());
        assert!(scored.reason.starts_with("low effort quick win"));
    }

    #[test]
    fn test_reason_notes_graph_position() {
        let calc = PriorityCalculator::new();
        let task = Task::new("1", "Blocked").with_importance(9);
        let position = NodePosition {
            waiting_on: 2,
            ..NodePosition::default()
        };
        let scored = calc.score(&task, position, &WeightVector::default(), today());
        assert!(scored.reason.ends_with("; waiting on 2 prerequisites"));
        assert!(!scored.ready);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::task::Task;
use super::weights::ComponentScores;

/// Eisenhower matrix quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    UrgentImportant,
    UrgentNotImportant,
    NotUrgentImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    pub const fn classify(urgent: bool, important: bool) -> Self {
        match (urgent, important) {
            (true, true) => Self::UrgentImportant,
            (true, false) => Self::UrgentNotImportant,
            (false, true) => Self::NotUrgentImportant,
            (false, false) => Self::NotUrgentNotImportant,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UrgentImportant => "urgent-important",
            Self::UrgentNotImportant => "urgent-not-important",
            Self::NotUrgentImportant => "not-urgent-important",
            Self::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task together with its computed priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: f64,
    pub importance: u8,
    pub dependencies: Vec<String>,
    /// Priority in `[0, 1]`, rounded for display stability
    pub score: f64,
    pub reason: String,
    pub matrix: Quadrant,
    pub components: ComponentScores,
    /// Not blocked by anything else in the batch and not in a cycle
    pub ready: bool,
}

impl ScoredTask {
    pub fn from_task(
        task: &Task,
        score: f64,
        reason: String,
        matrix: Quadrant,
        components: ComponentScores,
        ready: bool,
    ) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            due_date: task.due_date,
            estimated_hours: task.estimated_hours,
            importance: task.importance,
            dependencies: task.dependencies.clone(),
            score,
            reason,
            matrix,
            components,
            ready,
        }
    }
}

/// A scored task picked for the "what next" list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub task: ScoredTask,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_labels() {
        assert_eq!(Quadrant::classify(true, true).as_str(), "urgent-important");
        assert_eq!(
            Quadrant::classify(true, false).as_str(),
            "urgent-not-important"
        );
        assert_eq!(
            Quadrant::classify(false, true).as_str(),
            "not-urgent-important"
        );
        assert_eq!(
            Quadrant::classify(false, false).as_str(),
            "not-urgent-not-important"
        );
    }

    #[test]
    fn test_quadrant_serializes_kebab_case() {
        let json = serde_json::to_string(&Quadrant::NotUrgentImportant).unwrap();
        assert_eq!(json, "\"not-urgent-important\"");
    }

    #[test]
    fn test_suggestion_flattens_task_fields() {
        let task = Task::new("1", "Ship it");
        let scored = ScoredTask::from_task(
            &task,
            0.5,
            "balanced".to_string(),
            Quadrant::UrgentImportant,
            ComponentScores::default(),
            true,
        );
        let suggestion = Suggestion {
            task: scored,
            explanation: "why".to_string(),
        };

        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["matrix"], "urgent-important");
        assert_eq!(value["explanation"], "why");
        assert!(value["due_date"].is_null());
    }
}

//! Scoring weights, per-task component scores and strategy presets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four inputs that make up a priority score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Urgency,
    Importance,
    Effort,
    Graph,
}

impl Component {
    pub const ALL: [Self; 4] = [Self::Urgency, Self::Importance, Self::Effort, Self::Graph];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Urgency => "urgency",
            Self::Importance => "importance",
            Self::Effort => "effort",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative influence of each component on the final score.
///
/// This is the process-wide, feedback-adjusted state. Values are kept
/// non-negative and, after any feedback adjustment, sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightVector {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub graph: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            urgency: 0.35,
            importance: 0.35,
            effort: 0.15,
            graph: 0.15,
        }
    }
}

impl WeightVector {
    pub const fn new(urgency: f64, importance: f64, effort: f64, graph: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            graph,
        }
    }

    /// Every component set to the same value
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn get(&self, component: Component) -> f64 {
        match component {
            Component::Urgency => self.urgency,
            Component::Importance => self.importance,
            Component::Effort => self.effort,
            Component::Graph => self.graph,
        }
    }

    pub fn set(&mut self, component: Component, value: f64) {
        match component {
            Component::Urgency => self.urgency = value,
            Component::Importance => self.importance = value,
            Component::Effort => self.effort = value,
            Component::Graph => self.graph = value,
        }
    }

    pub fn sum(&self) -> f64 {
        Component::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Component-wise product, used to apply a strategy's multipliers
    pub fn scaled_by(&self, multipliers: &Self) -> Self {
        Self::new(
            self.urgency * multipliers.urgency,
            self.importance * multipliers.importance,
            self.effort * multipliers.effort,
            self.graph * multipliers.graph,
        )
    }

    /// Rescale so the components sum to 1. A zero vector is returned as-is.
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total <= 0.0 {
            return *self;
        }
        Self::new(
            self.urgency / total,
            self.importance / total,
            self.effort / total,
            self.graph / total,
        )
    }

    /// Check that every weight is finite and non-negative, and at least
    /// one is positive.
    pub fn validate(&self) -> Result<(), String> {
        for component in Component::ALL {
            let value = self.get(component);
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{component} weight must be a non-negative number, got {value}"
                ));
            }
        }
        if self.sum() <= 0.0 {
            return Err("at least one weight must be positive".to_string());
        }
        Ok(())
    }
}

/// Partial weights supplied with a single request.
///
/// Given fields replace the shared weights for that request only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightOverride {
    pub urgency: Option<f64>,
    pub importance: Option<f64>,
    pub effort: Option<f64>,
    pub graph: Option<f64>,
}

impl WeightOverride {
    pub fn apply_to(&self, base: WeightVector) -> WeightVector {
        WeightVector::new(
            self.urgency.unwrap_or(base.urgency),
            self.importance.unwrap_or(base.importance),
            self.effort.unwrap_or(base.effort),
            self.graph.unwrap_or(base.graph),
        )
    }
}

/// Component values of one scored task, each in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub graph: f64,
}

impl ComponentScores {
    pub const fn get(&self, component: Component) -> f64 {
        match component {
            Component::Urgency => self.urgency,
            Component::Importance => self.importance,
            Component::Effort => self.effort,
            Component::Graph => self.graph,
        }
    }

    /// Component-wise mean; `None` for an empty input
    pub fn mean<'a, I>(profiles: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut total = Self::default();
        let mut count = 0usize;
        for p in profiles {
            total.urgency += p.urgency;
            total.importance += p.importance;
            total.effort += p.effort;
            total.graph += p.graph;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self {
            urgency: total.urgency / n,
            importance: total.importance / n,
            effort: total.effort / n,
            graph: total.graph / n,
        })
    }
}

/// Named weighting preset selected per request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Balanced,
    DeadlineFirst,
    ImportanceFirst,
    QuickWins,
}

impl Strategy {
    /// Resolve a client-supplied name. Unknown or missing names fall back
    /// to [`Strategy::Balanced`].
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or_default()
    }

    /// Parse a known strategy name or one of its aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "balanced" | "smart" => Some(Self::Balanced),
            "deadline-first" | "deadline" => Some(Self::DeadlineFirst),
            "importance-first" | "impact" => Some(Self::ImportanceFirst),
            "quick-wins" | "fastest" => Some(Self::QuickWins),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::DeadlineFirst => "deadline-first",
            Self::ImportanceFirst => "importance-first",
            Self::QuickWins => "quick-wins",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier profiles applied on top of the shared weights.
///
/// `balanced` is always the identity so that feedback-tuned weights are
/// used unchanged by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct StrategyPresets {
    pub deadline_first: WeightVector,
    pub importance_first: WeightVector,
    pub quick_wins: WeightVector,
}

impl Default for StrategyPresets {
    fn default() -> Self {
        Self {
            deadline_first: WeightVector::new(1.5, 1.0, 1.0, 1.0),
            importance_first: WeightVector::new(1.0, 1.5, 1.0, 1.0),
            quick_wins: WeightVector::new(1.0, 1.0, 1.5, 1.0),
        }
    }
}

impl StrategyPresets {
    pub const fn multipliers(&self, strategy: Strategy) -> WeightVector {
        match strategy {
            Strategy::Balanced => WeightVector::uniform(1.0),
            Strategy::DeadlineFirst => self.deadline_first,
            Strategy::ImportanceFirst => self.importance_first,
            Strategy::QuickWins => self.quick_wins,
        }
    }

    /// Weights actually used for one request
    pub fn effective(&self, strategy: Strategy, base: WeightVector) -> WeightVector {
        base.scaled_by(&self.multipliers(strategy))
    }
}

//! Request-level orchestration of the prioritization pipeline.
//!
//! raw records → task model → dependency graph → scoring → ranking →
//! suggestions. Each call is independent; the only shared state is the
//! weight vector and the suggestion ledger, both reached through ports.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::adapters::memory::{InMemorySuggestionLedger, InMemoryWeightRepository};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    normalize_batch, Config, DependencyGraph, Edge, ScoredTask, Strategy, StrategyPresets,
    Suggestion, Task, WeightOverride, WeightVector,
};
use crate::domain::ports::{Clock, SuggestionLedger, SystemClock, WeightRepository};
use crate::services::calendar::WorkingCalendar;
use crate::services::dependency_resolver::DependencyResolver;
use crate::services::feedback::{FeedbackAdapter, FeedbackOutcome};
use crate::services::priority_calculator::PriorityCalculator;
use crate::services::ranking::{rank_tasks, SuggestionSelector};

/// Ranked result of one analyze request
#[derive(Debug, Clone)]
pub struct Analysis {
    pub run_id: Uuid,
    pub strategy: Strategy,
    /// Weights actually used, after overrides and strategy multipliers
    pub weights: WeightVector,
    /// Sorted by score, see [`rank_tasks`]
    pub tasks: Vec<ScoredTask>,
    pub cycles: Vec<Vec<String>>,
}

impl Analysis {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Result of one suggest request
#[derive(Debug, Clone)]
pub struct SuggestionSet {
    pub strategy: Strategy,
    pub suggestions: Vec<Suggestion>,
    pub cycles: Vec<Vec<String>>,
}

/// Node data for external graph rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub in_cycle: bool,
    pub ready: bool,
    pub external_dependencies: Vec<String>,
}

/// Nodes and edges of a batch for external graph rendering
#[derive(Debug, Clone)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
    pub cycles: Vec<Vec<String>>,
}

pub struct PrioritizationService {
    calculator: PriorityCalculator,
    resolver: DependencyResolver,
    selector: SuggestionSelector,
    feedback: FeedbackAdapter,
    weights: Arc<dyn WeightRepository>,
    ledger: Arc<dyn SuggestionLedger>,
    presets: StrategyPresets,
    clock: Arc<dyn Clock>,
    max_batch_size: usize,
}

impl PrioritizationService {
    /// Service with in-memory learning state and the system clock
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryWeightRepository::new(config.weights)),
            Arc::new(InMemorySuggestionLedger::new(
                config.learning.ledger_capacity,
            )),
            Arc::new(SystemClock),
        )
    }

    pub fn new(
        config: &Config,
        weights: Arc<dyn WeightRepository>,
        ledger: Arc<dyn SuggestionLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let calculator = PriorityCalculator::with_config(
            config.engine.clone(),
            WorkingCalendar::from_config(&config.calendar),
        );
        let feedback = FeedbackAdapter::new(
            Arc::clone(&weights),
            Arc::clone(&ledger),
            config.learning.clone(),
        );

        Self {
            calculator,
            resolver: DependencyResolver::new(),
            selector: SuggestionSelector::default(),
            feedback,
            weights,
            ledger,
            presets: config.strategies,
            clock,
            max_batch_size: config.engine.max_batch_size,
        }
    }

    /// Replace the clock, e.g. to evaluate deadlines against a fixed date
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Snapshot of the shared, feedback-adjusted weights
    pub fn current_weights(&self) -> WeightVector {
        self.weights.snapshot()
    }

    /// Score and rank a batch of raw task records
    pub fn analyze(
        &self,
        raw: &[Value],
        strategy: Option<&str>,
        overrides: Option<&WeightOverride>,
    ) -> DomainResult<Analysis> {
        let tasks = self.normalize(raw)?;
        self.analyze_tasks(&tasks, strategy, overrides)
    }

    /// Score and rank already normalized tasks
    pub fn analyze_tasks(
        &self,
        tasks: &[Task],
        strategy: Option<&str>,
        overrides: Option<&WeightOverride>,
    ) -> DomainResult<Analysis> {
        self.check_batch_size(tasks.len())?;

        let run_id = Uuid::new_v4();
        let span = info_span!("analyze", %run_id, tasks = tasks.len());
        let _enter = span.enter();

        let resolved = Strategy::resolve(strategy);
        if let Some(name) = strategy {
            if Strategy::from_name(name).is_none() {
                debug!(requested = name, fallback = %resolved, "unknown strategy");
            }
        }
        let weights = self.effective_weights(resolved, overrides)?;

        let graph = self.resolver.build(tasks);
        let today = self.clock.today();
        let scored = self.calculator.score_all(tasks, &graph, &weights, today);
        let ranked = rank_tasks(scored);

        if graph.has_cycles() {
            warn!(cycles = ?graph.cycles(), "batch contains circular dependencies");
        }
        info!(strategy = %resolved, "analysis complete");

        Ok(Analysis {
            run_id,
            strategy: resolved,
            weights,
            tasks: ranked,
            cycles: graph.cycles().to_vec(),
        })
    }

    /// Pick up to three ready tasks and remember their profiles for
    /// later feedback
    pub fn suggest(
        &self,
        raw: &[Value],
        strategy: Option<&str>,
        overrides: Option<&WeightOverride>,
    ) -> DomainResult<SuggestionSet> {
        let analysis = self.analyze(raw, strategy, overrides)?;
        let suggestions = self.selector.select(&analysis.tasks);

        for suggestion in &suggestions {
            self.ledger
                .record(&suggestion.task.id, suggestion.task.components);
        }
        debug!(
            run_id = %analysis.run_id,
            suggested = suggestions.len(),
            "suggestions selected"
        );

        Ok(SuggestionSet {
            strategy: analysis.strategy,
            suggestions,
            cycles: analysis.cycles,
        })
    }

    /// Node and edge data for rendering the dependency graph
    pub fn graph(&self, raw: &[Value]) -> DomainResult<GraphView> {
        let tasks = self.normalize(raw)?;
        let graph = self.resolver.build(&tasks);
        Ok(graph_view(&tasks, &graph))
    }

    /// Apply an accept/reject signal for previously suggested tasks
    pub fn feedback(&self, selected: &[String], helpful: bool) -> FeedbackOutcome {
        self.feedback.apply(selected, helpful)
    }

    fn normalize(&self, raw: &[Value]) -> DomainResult<Vec<Task>> {
        self.check_batch_size(raw.len())?;
        Ok(normalize_batch(raw)?)
    }

    fn check_batch_size(&self, size: usize) -> DomainResult<()> {
        if size > self.max_batch_size {
            return Err(DomainError::BatchTooLarge {
                size,
                limit: self.max_batch_size,
            });
        }
        Ok(())
    }

    fn effective_weights(
        &self,
        strategy: Strategy,
        overrides: Option<&WeightOverride>,
    ) -> DomainResult<WeightVector> {
        let shared = self.weights.snapshot();
        let base = overrides.map_or(shared, |o| o.apply_to(shared));
        base.validate().map_err(DomainError::InvalidWeights)?;
        Ok(self.presets.effective(strategy, base))
    }
}

fn graph_view(tasks: &[Task], graph: &DependencyGraph) -> GraphView {
    let nodes = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let position = graph.position(i);
            GraphNode {
                id: task.id.clone(),
                label: task.title.clone(),
                in_cycle: position.in_cycle,
                ready: position.is_ready(),
                external_dependencies: graph.external_dependencies(i).to_vec(),
            }
        })
        .collect();

    GraphView {
        nodes,
        edges: graph.edges().collect(),
        cycles: graph.cycles().to_vec(),
    }
}

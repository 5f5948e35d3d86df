pub mod config;
pub mod graph;
pub mod scored;
pub mod task;
pub mod weights;

pub use config::{
    CalendarConfig, Config, EngineConfig, LearningConfig, LogFormat, LoggingConfig,
    RotationPolicy, ServerConfig,
};
pub use graph::{DependencyGraph, Edge, NodePosition};
pub use scored::{Quadrant, ScoredTask, Suggestion};
pub use task::{normalize_batch, Task};
pub use weights::{
    Component, ComponentScores, Strategy, StrategyPresets, WeightOverride, WeightVector,
};

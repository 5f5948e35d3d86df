use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::weights::{StrategyPresets, WeightVector};

/// Main configuration structure for Triage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scoring engine parameters
    #[serde(default)]
    pub engine: EngineConfig,

    /// Initial weight vector, before any feedback
    #[serde(default)]
    pub weights: WeightVector,

    /// Strategy multiplier presets
    #[serde(default)]
    pub strategies: StrategyPresets,

    /// Feedback learning parameters
    #[serde(default)]
    pub learning: LearningConfig,

    /// Working-day calendar used for deadline urgency
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from the browser client
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Directory for log files (optional, if None logs only to stdout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Scoring engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Largest batch accepted by a single request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Working days at which urgency falls to zero
    #[serde(default = "default_urgency_horizon_days")]
    pub urgency_horizon_days: f64,

    /// Effort above this many hours gets no quick-win credit
    #[serde(default = "default_effort_cap_hours")]
    pub effort_cap_hours: f64,

    /// Number of blocked dependents at which the blocker bonus saturates
    #[serde(default = "default_blocker_saturation")]
    pub blocker_saturation: usize,

    /// Urgency component at or above which a task counts as urgent
    #[serde(default = "default_threshold")]
    pub urgent_threshold: f64,

    /// Importance component at or above which a task counts as important
    #[serde(default = "default_threshold")]
    pub important_threshold: f64,

    /// Decimal places kept in reported scores
    #[serde(default = "default_score_precision")]
    pub score_precision: u32,
}

const fn default_max_batch_size() -> usize {
    1000
}

const fn default_urgency_horizon_days() -> f64 {
    10.0
}

const fn default_effort_cap_hours() -> f64 {
    12.0
}

const fn default_blocker_saturation() -> usize {
    4
}

const fn default_threshold() -> f64 {
    0.5
}

const fn default_score_precision() -> u32 {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            urgency_horizon_days: default_urgency_horizon_days(),
            effort_cap_hours: default_effort_cap_hours(),
            blocker_saturation: default_blocker_saturation(),
            urgent_threshold: default_threshold(),
            important_threshold: default_threshold(),
            score_precision: default_score_precision(),
        }
    }
}

/// Feedback learning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LearningConfig {
    /// Amount added to or removed from a weight per feedback call
    #[serde(default = "default_step")]
    pub step: f64,

    /// Lowest value a weight can be decayed to
    #[serde(default = "default_floor")]
    pub floor: f64,

    /// Number of suggested tasks remembered for feedback
    #[serde(default = "default_ledger_capacity")]
    pub ledger_capacity: usize,
}

const fn default_step() -> f64 {
    0.05
}

const fn default_floor() -> f64 {
    0.05
}

const fn default_ledger_capacity() -> usize {
    256
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            floor: default_floor(),
            ledger_capacity: default_ledger_capacity(),
        }
    }
}

/// Working-day calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CalendarConfig {
    /// Do not count Saturdays and Sundays as working days
    #[serde(default = "default_true")]
    pub skip_weekends: bool,

    /// Dates that never count as working days
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            skip_weekends: true,
            holidays: Vec::new(),
        }
    }
}

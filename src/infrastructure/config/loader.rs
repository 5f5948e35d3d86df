use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Server host cannot be empty")]
    EmptyHost,

    #[error("Invalid max_batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid {name}: {value}. Must be a positive number")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Invalid {name}: {value}. Must be between 0 and 1")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("Invalid blocker_saturation: {0}. Must be at least 1")]
    InvalidBlockerSaturation(usize),

    #[error("Invalid score_precision: {0}. Must be at most 10")]
    InvalidScorePrecision(u32),

    #[error("Invalid ledger_capacity: {0}. Must be at least 1")]
    InvalidLedgerCapacity(usize),

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid {name} strategy multipliers: {reason}")]
    InvalidStrategy { name: &'static str, reason: String },
}

const ENV_PREFIX: &str = "TRIAGE_";
const PROJECT_CONFIG: &str = ".triage/config.yaml";
const LOCAL_CONFIG: &str = ".triage/local.yaml";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .triage/config.yaml (project config)
    /// 3. .triage/local.yaml (local overrides, optional)
    /// 4. Environment variables (TRIAGE_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG))
            .merge(Yaml::file(LOCAL_CONFIG))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// Environment variables still take precedence over the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.server.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        let engine = &config.engine;
        if engine.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(engine.max_batch_size));
        }
        positive("urgency_horizon_days", engine.urgency_horizon_days)?;
        positive("effort_cap_hours", engine.effort_cap_hours)?;
        if engine.blocker_saturation == 0 {
            return Err(ConfigError::InvalidBlockerSaturation(
                engine.blocker_saturation,
            ));
        }
        unit_range("urgent_threshold", engine.urgent_threshold)?;
        unit_range("important_threshold", engine.important_threshold)?;
        if engine.score_precision > 10 {
            return Err(ConfigError::InvalidScorePrecision(engine.score_precision));
        }

        let learning = &config.learning;
        positive("learning.step", learning.step)?;
        unit_range("learning.floor", learning.floor)?;
        if learning.ledger_capacity == 0 {
            return Err(ConfigError::InvalidLedgerCapacity(learning.ledger_capacity));
        }

        config
            .weights
            .validate()
            .map_err(ConfigError::InvalidWeights)?;

        let presets = [
            ("deadline_first", config.strategies.deadline_first),
            ("importance_first", config.strategies.importance_first),
            ("quick_wins", config.strategies.quick_wins),
        ];
        for (name, multipliers) in presets {
            multipliers
                .validate()
                .map_err(|reason| ConfigError::InvalidStrategy { name, reason })?;
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

//! Command handlers, one module per subcommand.

pub mod analyze;
pub mod config;
pub mod graph;
pub mod serve;
pub mod suggest;

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::FixedClock;
use crate::services::PrioritizationService;

/// Service for a one-shot batch command, optionally pinned to a date
pub(crate) fn batch_service(config: &Config, today: Option<NaiveDate>) -> PrioritizationService {
    let service = PrioritizationService::from_config(config);
    match today {
        Some(date) => service.with_clock(Arc::new(FixedClock(date))),
        None => service,
    }
}

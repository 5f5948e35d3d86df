use anyhow::{Context, Result};
use console::style;

use crate::adapters::http::handlers::SuggestResponse;
use crate::cli::commands::batch_service;
use crate::cli::input::read_batch;
use crate::cli::output::TableFormatter;
use crate::cli::types::BatchArgs;
use crate::domain::models::Config;

/// Handle the suggest command
pub fn execute(args: &BatchArgs, config: &Config, json: bool) -> Result<()> {
    let tasks = read_batch(&args.input)?;
    let service = batch_service(config, args.today);
    let set = service
        .suggest(&tasks, args.strategy.as_deref(), None)
        .context("Failed to suggest tasks")?;

    if json {
        let response = SuggestResponse {
            warning: (!set.cycles.is_empty()).then_some(true),
            suggestions: set.suggestions,
            cycles: set.cycles,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if set.suggestions.is_empty() {
        println!("No ready tasks to suggest.");
    } else {
        println!("Work on next ({} strategy):", style(set.strategy).bold());
        println!("{}", TableFormatter::new().format_suggestions(&set.suggestions));
    }
    print_cycle_warning(&set.cycles);

    Ok(())
}

/// Print detected cycles, if any, as a highlighted warning
pub(crate) fn print_cycle_warning(cycles: &[Vec<String>]) {
    if cycles.is_empty() {
        return;
    }
    println!(
        "\n{} circular dependencies detected:",
        style("Warning:").yellow().bold()
    );
    for cycle in cycles {
        println!("  {}", cycle.join(" -> "));
    }
}

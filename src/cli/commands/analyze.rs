use anyhow::{Context, Result};
use console::style;

use crate::adapters::http::handlers::{AnalyzeResponse, AnalyzeResult};
use crate::cli::commands::batch_service;
use crate::cli::input::read_batch;
use crate::cli::output::TableFormatter;
use crate::cli::types::BatchArgs;
use crate::domain::models::Config;

/// Handle the analyze command
pub fn execute(args: &BatchArgs, config: &Config, json: bool) -> Result<()> {
    let tasks = read_batch(&args.input)?;
    let service = batch_service(config, args.today);
    let analysis = service
        .analyze(&tasks, args.strategy.as_deref(), None)
        .context("Failed to analyze tasks")?;

    if json {
        let response = AnalyzeResponse {
            warning: (!analysis.cycles.is_empty()).then_some(true),
            result: AnalyzeResult {
                tasks: analysis.tasks,
                cycles: analysis.cycles,
                strategy: analysis.strategy,
                weights: analysis.weights,
            },
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if analysis.tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!(
        "Ranked with the {} strategy:",
        style(analysis.strategy).bold()
    );
    println!("{}", TableFormatter::new().format_scored(&analysis.tasks));
    super::suggest::print_cycle_warning(&analysis.cycles);
    println!("\nShowing {} task(s)", analysis.tasks.len());

    Ok(())
}

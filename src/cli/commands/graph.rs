use anyhow::{Context, Result};

use crate::adapters::http::handlers::GraphResponse;
use crate::cli::commands::suggest::print_cycle_warning;
use crate::cli::input::read_batch;
use crate::cli::output::TableFormatter;
use crate::cli::types::GraphArgs;
use crate::domain::models::Config;
use crate::services::PrioritizationService;

/// Handle the graph command
pub fn execute(args: &GraphArgs, config: &Config, json: bool) -> Result<()> {
    let tasks = read_batch(&args.input)?;
    let view = PrioritizationService::from_config(config)
        .graph(&tasks)
        .context("Failed to build dependency graph")?;

    if json {
        let response = GraphResponse {
            nodes: view.nodes,
            edges: view.edges,
            cycles: view.cycles,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if view.nodes.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!("{}", TableFormatter::new().format_graph(&view));
    print_cycle_warning(&view.cycles);
    println!(
        "\n{} task(s), {} dependency edge(s)",
        view.nodes.len(),
        view.edges.len()
    );

    Ok(())
}

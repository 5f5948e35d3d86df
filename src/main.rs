//! Triage CLI entry point.

use anyhow::Result;
use clap::Parser;

use triage::cli::{commands, handle_error, Cli, Commands};
use triage::infrastructure::logging::LoggerImpl;
use triage::{Config, ConfigLoader};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Analyze(args) => commands::analyze::execute(&args, &config, cli.json),
        Commands::Suggest(args) => commands::suggest::execute(&args, &config, cli.json),
        Commands::Graph(args) => commands::graph::execute(&args, &config, cli.json),
        Commands::Config => commands::config::execute(&config, cli.json),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

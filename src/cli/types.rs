//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage - task prioritization engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .triage/config.yaml layering)
    #[arg(long, global = true, env = "TRIAGE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Score and rank every task in a batch
    Analyze(BatchArgs),

    /// Suggest up to three tasks to work on next
    Suggest(BatchArgs),

    /// Show the dependency graph of a batch
    Graph(GraphArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// JSON file with a task array or `{"tasks": [...]}`; `-` reads stdin
    pub input: PathBuf,

    /// Strategy: balanced, deadline-first, importance-first, quick-wins
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Evaluate deadlines as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// JSON file with a task array or `{"tasks": [...]}`; `-` reads stdin
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_suggest_with_strategy_and_date() {
        let cli = Cli::try_parse_from([
            "triage",
            "suggest",
            "tasks.json",
            "--strategy",
            "quick-wins",
            "--today",
            "2025-03-12",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Suggest(args) => {
                assert_eq!(args.input, PathBuf::from("tasks.json"));
                assert_eq!(args.strategy.as_deref(), Some("quick-wins"));
                assert_eq!(args.today, NaiveDate::from_ymd_opt(2025, 3, 12));
            }
            _ => panic!("expected suggest command"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["triage", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_rejects_invalid_date() {
        assert!(Cli::try_parse_from(["triage", "analyze", "-", "--today", "soon"]).is_err());
    }
}

//! Command-line interface: one-shot batch commands and the HTTP server.

pub mod commands;
pub mod input;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use console::style;

/// Report a failed command and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({
            "detail": err.to_string(),
            "causes": chain.get(1..).unwrap_or_default(),
        });
        eprintln!("{body}");
    } else {
        eprintln!("{} {err:#}", style("Error:").red().bold());
    }
    std::process::exit(1);
}

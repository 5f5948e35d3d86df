use anyhow::{Context, Result};

use crate::domain::models::Config;

/// Handle the config command: print the effective, validated configuration
pub fn execute(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        let yaml = serde_yaml::to_string(config).context("Failed to render configuration")?;
        print!("{yaml}");
    }
    Ok(())
}

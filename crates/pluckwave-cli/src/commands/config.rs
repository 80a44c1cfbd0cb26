//! Config command implementation
//!
//! Prints a render configuration as JSON, ready to be edited and passed back
//! with `--config`.

use anyhow::Result;
use std::process::ExitCode;

/// Run the config command
pub fn run(config_path: Option<&str>) -> Result<ExitCode> {
    let config = super::load_config(config_path)?;
    println!("{}", render_json(&config)?);
    Ok(ExitCode::SUCCESS)
}

fn render_json(config: &pluckwave_synth::RenderConfig) -> Result<String> {
    Ok(config.to_json_pretty()?)
}

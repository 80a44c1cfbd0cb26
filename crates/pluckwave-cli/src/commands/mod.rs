//! CLI command implementations

pub mod config;
pub mod pluck;
pub mod render;

use anyhow::{Context, Result};
use pluckwave_synth::RenderConfig;

/// Loads a render configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path)),
        None => Ok(RenderConfig::default()),
    }
}

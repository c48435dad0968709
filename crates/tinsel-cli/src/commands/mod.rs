//! CLI command implementations

pub mod config;
pub mod generate;
pub mod simulate;

use anyhow::{Context, Result};
use tinsel_scene::ExperienceConfig;

/// Config from a file, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<ExperienceConfig> {
    match path {
        Some(path) => ExperienceConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(ExperienceConfig::default()),
    }
}

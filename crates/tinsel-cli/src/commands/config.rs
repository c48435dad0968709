//! Config file commands

use anyhow::{Context, Result};
use clap::Subcommand;
use tinsel_scene::ExperienceConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the default configuration as TOML
    Init,

    /// Parse a configuration file and show the values in effect
    Check {
        /// Path to config file
        path: String,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init => init(),
        ConfigCommands::Check { path } => check(&path),
    }
}

fn init() -> Result<()> {
    print!("{}", default_toml()?);
    Ok(())
}

fn default_toml() -> Result<String> {
    Ok(ExperienceConfig::default().to_toml_string()?)
}

fn check(path: &str) -> Result<()> {
    let config =
        ExperienceConfig::load(path).with_context(|| format!("Failed to load config: {}", path))?;
    let shape = config.tree_shape();

    println!("Config: {}", path);
    println!(
        "  Tree: {} particles, colour {}",
        shape.particle_count,
        config.tree_color().to_hex_string()
    );
    println!("  Ribbon colour: {}", config.ribbon_color().to_hex_string());
    println!("  Star colour: {}", config.star_color().to_hex_string());
    println!(
        "  Snow: {} ({} flakes)",
        if config.snow_enabled { "on" } else { "off" },
        config.snow_count() * tinsel_particles::ambient::SNOW_DENSITY
    );
    println!("  Starfield: {} stars", config.star_count());
    println!("  Lights: {}", if config.lights_on { "on" } else { "off" });
    println!("  Rotation speed: {}", config.rotation_speed());
    println!("  Countdown: {}s", config.countdown_seconds());
    println!(
        "  Music: {}{}",
        if config.music_enabled { "on" } else { "off" },
        config
            .bgm_url
            .as_deref()
            .map(|u| format!(" ({})", u))
            .unwrap_or_default()
    );
    println!("  Photos: {}", config.photo_urls.len());
    println!("  Header: \"{}\"", config.header_text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_output_parses_back_to_defaults() {
        let text = default_toml().unwrap();
        assert!(text.contains("rotation_speed"));
        assert_eq!(
            ExperienceConfig::parse(&text).unwrap(),
            ExperienceConfig::default()
        );
    }
}

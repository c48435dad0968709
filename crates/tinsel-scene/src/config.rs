//! User-editable experience configuration (TOML)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tinsel_core::{Color, Result, TinselError};
use tinsel_particles::tree::TreeShape;

/// Upper bounds applied where counts reach a generator
pub const MAX_TREE_PARTICLES: usize = 200_000;
pub const MAX_SNOW_COUNT: usize = 20_000;
pub const MAX_STAR_DENSITY: usize = 20_000;
pub const MAX_COUNTDOWN_SECONDS: u32 = 60;
pub const MAX_ROTATION_SPEED: f32 = 5.0;

/// Rotation restored by the rotation toggle
pub const DEFAULT_ROTATION_SPEED: f32 = 0.2;

pub const DEFAULT_TREE_COLOR: &str = "#024025";
pub const DEFAULT_RIBBON_COLOR: &str = "#ffd700";
pub const DEFAULT_STAR_COLOR: &str = "#ffaa00";
pub const DEFAULT_SKY_COLOR: &str = "#000510";
pub const DEFAULT_HEADER_COLOR: &str = "#d4af37";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    pub lights_on: bool,
    pub snow_enabled: bool,
    pub music_enabled: bool,
    pub rotation_speed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgm_url: Option<String>,
    pub photo_urls: Vec<String>,
    /// Mirrors the controller; never edited directly
    pub ribbon_animation_trigger: u32,
    /// Mirrors the controller; never edited directly
    pub is_experience_active: bool,
    pub tree_color: String,
    pub ribbon_color: String,
    pub star_color: String,
    pub star_density: usize,
    pub sky_color: String,
    pub header_text: String,
    pub header_font: String,
    pub header_color: String,

    pub countdown_seconds: u32,
    /// Snow emits four flakes per unit
    pub snow_count: usize,
    pub tree_particles: usize,
    pub reveal_tree_with_growth: bool,
    pub gifts_follow_growth: bool,
    /// Procedural glitter over the tree needles
    pub glitter: bool,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            lights_on: true,
            snow_enabled: true,
            music_enabled: false,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            bgm_url: None,
            photo_urls: Vec::new(),
            ribbon_animation_trigger: 0,
            is_experience_active: false,
            tree_color: DEFAULT_TREE_COLOR.into(),
            ribbon_color: DEFAULT_RIBBON_COLOR.into(),
            star_color: DEFAULT_STAR_COLOR.into(),
            star_density: 3000,
            sky_color: DEFAULT_SKY_COLOR.into(),
            header_text: "Merry Christmas".into(),
            header_font: "\"Mountains of Christmas\", serif".into(),
            header_color: DEFAULT_HEADER_COLOR.into(),
            countdown_seconds: 0,
            snow_count: 2000,
            tree_particles: 45_000,
            reveal_tree_with_growth: false,
            gifts_follow_growth: true,
            glitter: false,
        }
    }
}

/// Parse a colour field, warning and falling back when it is malformed
fn color_or(field: &str, value: &str, fallback: &str) -> Color {
    match Color::parse_hex(value) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[config] {field}: {e}, using {fallback}");
            Color::parse_hex_or(fallback, Color::WHITE)
        }
    }
}

impl ExperienceConfig {
    /// Load from a TOML file; missing keys take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn tree_color(&self) -> Color {
        color_or("tree_color", &self.tree_color, DEFAULT_TREE_COLOR)
    }

    pub fn ribbon_color(&self) -> Color {
        color_or("ribbon_color", &self.ribbon_color, DEFAULT_RIBBON_COLOR)
    }

    pub fn star_color(&self) -> Color {
        color_or("star_color", &self.star_color, DEFAULT_STAR_COLOR)
    }

    pub fn sky_color(&self) -> Color {
        color_or("sky_color", &self.sky_color, DEFAULT_SKY_COLOR)
    }

    pub fn header_color(&self) -> Color {
        color_or("header_color", &self.header_color, DEFAULT_HEADER_COLOR)
    }

    pub fn tree_shape(&self) -> TreeShape {
        TreeShape {
            particle_count: self.tree_particles.min(MAX_TREE_PARTICLES),
            ..Default::default()
        }
    }

    /// Snow units; the generator emits four flakes per unit
    pub fn snow_count(&self) -> usize {
        self.snow_count.min(MAX_SNOW_COUNT)
    }

    pub fn star_count(&self) -> usize {
        self.star_density.min(MAX_STAR_DENSITY)
    }

    /// Radians per second; negative or non-finite speeds stop the rotation
    pub fn rotation_speed(&self) -> f32 {
        if self.rotation_speed.is_finite() {
            self.rotation_speed.clamp(0.0, MAX_ROTATION_SPEED)
        } else {
            0.0
        }
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds.min(MAX_COUNTDOWN_SECONDS)
    }

    /// Everything baked into the tree particle colours
    pub fn tree_shape_key(&self) -> TreeShapeKey {
        TreeShapeKey {
            tree_color: self.tree_color.to_ascii_lowercase(),
            star_color: self.star_color.to_ascii_lowercase(),
            particle_count: self.tree_shape().particle_count,
        }
    }

    /// Apply one control-panel action
    pub fn apply(&mut self, command: ConfigCommand) -> Result<()> {
        match command {
            ConfigCommand::ToggleLights => self.lights_on = !self.lights_on,
            ConfigCommand::ToggleSnow => self.snow_enabled = !self.snow_enabled,
            ConfigCommand::ToggleMusic => self.music_enabled = !self.music_enabled,
            ConfigCommand::ToggleRotation => {
                self.rotation_speed = if self.rotation_speed > 0.0 {
                    0.0
                } else {
                    DEFAULT_ROTATION_SPEED
                };
            }
            ConfigCommand::SetColor(target, value) => {
                Color::parse_hex(&value)?;
                let slot = match target {
                    ColorTarget::Tree => &mut self.tree_color,
                    ColorTarget::Ribbon => &mut self.ribbon_color,
                    ColorTarget::Star => &mut self.star_color,
                    ColorTarget::Sky => &mut self.sky_color,
                    ColorTarget::Header => &mut self.header_color,
                };
                *slot = value;
            }
            ConfigCommand::SetStarDensity(n) => {
                if n > MAX_STAR_DENSITY {
                    return Err(TinselError::ValueOutOfRange {
                        field: "star_density".into(),
                        min: 0.0,
                        max: MAX_STAR_DENSITY as f64,
                        value: n as f64,
                    });
                }
                self.star_density = n;
            }
            ConfigCommand::AddPhotos(urls) => self.photo_urls.extend(urls),
            ConfigCommand::SetBgm(url) => {
                self.bgm_url = Some(url);
                self.music_enabled = true;
            }
            ConfigCommand::SetHeaderText(text) => self.header_text = text,
            ConfigCommand::SetHeaderFont(font) => self.header_font = font,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Tree,
    Ribbon,
    Star,
    Sky,
    Header,
}

/// Control-panel actions
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    ToggleLights,
    ToggleSnow,
    ToggleMusic,
    /// Between stopped and the default speed
    ToggleRotation,
    SetColor(ColorTarget, String),
    SetStarDensity(usize),
    AddPhotos(Vec<String>),
    /// Also switches music on
    SetBgm(String),
    SetHeaderText(String),
    SetHeaderFont(String),
}

/// Inputs that force a full tree regeneration when they change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeShapeKey {
    pub tree_color: String,
    pub star_color: String,
    pub particle_count: usize,
}

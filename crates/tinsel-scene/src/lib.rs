//! Tinsel Scene - configuration and frame orchestration
//!
//! Ties the entities together into one scene driven by a frame loop:
//! - `ExperienceConfig`: TOML configuration and control-panel commands
//! - `ChristmasScene`: event routing, regeneration on shape changes, per-frame output
//! - `AmbientLayer`, `CameraRig`, `MusicGate`

pub mod ambient;
pub mod camera;
pub mod config;
pub mod music;
pub mod scene;

pub use ambient::AmbientLayer;
pub use camera::CameraRig;
pub use config::{ColorTarget, ConfigCommand, ExperienceConfig, TreeShapeKey};
pub use music::{MusicCommand, MusicGate};
pub use scene::{ChristmasScene, PhotoFrame, SceneFrame};

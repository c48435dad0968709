//! Tinsel Particles - procedural particle geometry
//!
//! Everything here is generation-time work, run once per shape change:
//! - Tree sampler (layered conifer) and its color/shading model
//! - Ribbon helix, star mesh + sparkles, gift layout
//! - Ambient systems: snow, starfield, magic motes
//! - Random streams vs deterministic hashed samples
//! - Point materials with composable shading stages
//! - GPU instance packing and procedural textures

pub mod ambient;
pub mod gifts;
pub mod material;
pub mod particle;
pub mod rand;
pub mod ribbon;
pub mod shading;
pub mod star;
pub mod texture;
pub mod tree;

pub use material::{
    ParticleBlendMode, PointMaterial, PointShade, ShadedPoint, ShadingStage, SparkleStage,
    Uniforms, VertexProgram,
};
pub use particle::{Particle, ParticleCategory, ParticleInstance, ParticleSet};
pub use rand::{DeterministicSample, ParticleRng, RandomSample};
pub use ribbon::RibbonPath;
pub use shading::ShadingPalette;
pub use tree::TreeShape;

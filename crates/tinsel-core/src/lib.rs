//! Tinsel Core - Foundational types for the tinsel scene
//!
//! This crate provides the types that all other tinsel crates depend on:
//! - `Vec3`, `Transform` - Spatial types
//! - `Color` - Linear RGB(A) with hex parsing, HSL offsets and HDR scaling
//! - `math` - Scalar helpers shared by samplers and vertex programs
//! - Error types and Result alias

mod color;
mod error;
pub mod math;
mod types;

pub use color::Color;
pub use error::{Result, TinselError};
pub use types::{Transform, Vec3};

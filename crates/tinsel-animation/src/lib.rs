//! Tinsel Animation - growth, reveal and per-frame motion
//!
//! Every animated entity owns its geometry and a private growth scalar that
//! eases toward the shared experience signal:
//! - `GrowthState` / `RevealBand`: smoothing and threshold visibility
//! - `vertex`: the per-particle programs behind each point material
//! - Entities: tree, ribbon, star, gifts, photo ornaments
//! - `PhotoFocus`: the single-focus rule for photo interaction

pub mod focus;
pub mod gifts;
pub mod growth;
pub mod photo;
pub mod reveal;
pub mod ribbon;
pub mod star;
pub mod tree;
pub mod vertex;

use tinsel_runtime::{ExperienceSignal, FrameTick};

pub use focus::PhotoFocus;
pub use gifts::GiftGroup;
pub use growth::GrowthState;
pub use photo::{DriftParams, FocusAnchor, OrnamentPlacement, PhotoGallery, PhotoOrnament};
pub use reveal::RevealBand;
pub use ribbon::RibbonEntity;
pub use star::StarEntity;
pub use tree::TreeEntity;

/// An entity advanced once per frame from the shared experience signal.
///
/// Implementations only touch their own state; the signal is read-only.
pub trait Animated {
    fn update(&mut self, tick: &FrameTick, signal: &ExperienceSignal);
}

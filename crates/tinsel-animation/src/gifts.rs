//! Gift pile under the tree

use crate::growth::{GrowthState, RATE_FAST};
use crate::reveal::RevealBand;
use crate::Animated;
use tinsel_core::{Transform, Vec3};
use tinsel_particles::gifts::{generate_gifts, GiftBox, GIFT_COUNT, GIFT_GROUP_Y};
use tinsel_particles::RandomSample;
use tinsel_runtime::{ExperienceSignal, FrameTick};

/// Gifts are the first thing to appear
const GIFT_REVEAL_KEY: f32 = 0.0;
const GIFT_BAND: RevealBand = RevealBand::Ramp { width: 0.1 };

pub struct GiftGroup {
    boxes: Vec<GiftBox>,
    growth: GrowthState,
    follow_growth: bool,
    scale: f32,
}

impl GiftGroup {
    pub fn new<R: RandomSample>(rng: &mut R) -> Self {
        Self::with_count(GIFT_COUNT, rng)
    }

    pub fn with_count<R: RandomSample>(count: usize, rng: &mut R) -> Self {
        Self {
            boxes: generate_gifts(count, rng),
            growth: GrowthState::new(RATE_FAST),
            follow_growth: true,
            scale: 0.0,
        }
    }

    pub fn boxes(&self) -> &[GiftBox] {
        &self.boxes
    }

    /// When false the pile is always fully shown
    pub fn set_follow_growth(&mut self, follow: bool) {
        self.follow_growth = follow;
    }

    pub fn growth(&self) -> f32 {
        self.growth.value()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_visible(&self) -> bool {
        GIFT_BAND.is_shown(GIFT_REVEAL_KEY, self.effective_growth())
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(Vec3::new(0.0, GIFT_GROUP_Y, 0.0)).with_scale(Vec3::splat(self.scale))
    }

    fn effective_growth(&self) -> f32 {
        if self.follow_growth {
            self.growth.value()
        } else {
            1.0
        }
    }
}

impl Animated for GiftGroup {
    fn update(&mut self, _tick: &FrameTick, signal: &ExperienceSignal) {
        self.growth.follow(signal);
        self.scale = GIFT_BAND.visibility(GIFT_REVEAL_KEY, self.effective_growth());
    }
}

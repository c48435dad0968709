//! Ribbon entity: wraps itself around the tree from the base up

use crate::growth::{GrowthState, RATE_FAST};
use crate::vertex::{ribbon_material, RibbonProgram};
use crate::Animated;
use tinsel_core::Color;
use tinsel_particles::ribbon::{generate_ribbon, RibbonPath};
use tinsel_particles::tree::TreeShape;
use tinsel_particles::{ParticleSet, PointMaterial, RandomSample};
use tinsel_runtime::{ExperienceSignal, FrameTick};

pub struct RibbonEntity {
    pub path: RibbonPath,
    particles: ParticleSet,
    pub material: PointMaterial<RibbonProgram>,
    growth: GrowthState,
    last_trigger: u32,
    lights_on: bool,
}

impl RibbonEntity {
    pub fn new<R: RandomSample>(shape: &TreeShape, color: Color, rng: &mut R) -> Self {
        let path = RibbonPath::for_tree(shape);
        let particles = generate_ribbon(&path, shape, rng);
        log::debug!(
            "[ribbon] generated {} of {} particles",
            particles.len(),
            particles.requested()
        );
        Self {
            path,
            particles,
            material: ribbon_material(color),
            growth: GrowthState::new(RATE_FAST),
            last_trigger: 0,
            lights_on: true,
        }
    }

    /// Rebuild for a new tree height; growth and trigger survive
    pub fn regenerate<R: RandomSample>(&mut self, shape: &TreeShape, rng: &mut R) {
        self.path = RibbonPath::for_tree(shape);
        self.particles = generate_ribbon(&self.path, shape, rng);
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Appearance only: particles are stored white
    pub fn set_color(&mut self, color: Color) {
        self.material.uniforms.color = color;
    }

    pub fn set_lights(&mut self, on: bool) {
        self.lights_on = on;
    }

    /// The ribbon is only drawn with the lights on
    pub fn is_drawn(&self) -> bool {
        self.lights_on
    }

    pub fn growth(&self) -> f32 {
        self.growth.value()
    }
}

impl Animated for RibbonEntity {
    fn update(&mut self, tick: &FrameTick, signal: &ExperienceSignal) {
        if signal.trigger != self.last_trigger {
            self.last_trigger = signal.trigger;
            if signal.active {
                self.growth.reset();
                log::debug!("[ribbon] rewrap (trigger {})", signal.trigger);
            }
        }

        self.growth.follow(signal);

        if self.lights_on {
            self.material.uniforms.time = tick.time;
            self.material.uniforms.growth = self.growth.value();
        }
    }
}

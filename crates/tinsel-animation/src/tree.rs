//! Tree entity: the needle/bulb particle set and its lights fade

use crate::growth::{GrowthState, RATE_FAST};
use crate::vertex::{tree_material, TreeProgram};
use crate::Animated;
use tinsel_core::math::lerp;
use tinsel_particles::shading::ShadingPalette;
use tinsel_particles::tree::{generate_tree, TreeShape};
use tinsel_particles::{ParticleSet, PointMaterial, RandomSample, SparkleStage};
use tinsel_runtime::{ExperienceSignal, FrameTick};

/// Opacity the tree settles at with the lights off
pub const LIGHTS_OFF_OPACITY: f32 = 0.05;
/// Per-frame ease rate of the lights fade
pub const OPACITY_RATE: f32 = 0.05;

pub struct TreeEntity {
    pub shape: TreeShape,
    particles: ParticleSet,
    pub material: PointMaterial<TreeProgram>,
    growth: GrowthState,
    lights_on: bool,
    /// When false the tree ignores growth and is always fully shown
    reveal_with_growth: bool,
}

impl TreeEntity {
    pub fn new<R: RandomSample>(shape: TreeShape, palette: &ShadingPalette, rng: &mut R) -> Self {
        let particles = generate_tree(&shape, palette, rng);
        Self {
            shape,
            particles,
            material: tree_material(shape.height),
            growth: GrowthState::new(RATE_FAST),
            lights_on: true,
            reveal_with_growth: false,
        }
    }

    /// Replace the particle set wholesale after a shape-affecting change
    pub fn regenerate<R: RandomSample>(
        &mut self,
        shape: TreeShape,
        palette: &ShadingPalette,
        rng: &mut R,
    ) {
        self.shape = shape;
        self.particles = generate_tree(&shape, palette, rng);
        self.material.program.height = shape.height;
        log::info!(
            "[tree] regenerated {} of {} particles",
            self.particles.len(),
            self.particles.requested()
        );
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn set_lights(&mut self, on: bool) {
        self.lights_on = on;
    }

    pub fn set_reveal_with_growth(&mut self, reveal: bool) {
        self.reveal_with_growth = reveal;
    }

    /// Attach or remove the glitter stage
    pub fn set_glitter(&mut self, stage: Option<SparkleStage>) {
        self.material.clear_stages();
        if let Some(stage) = stage {
            self.material.push_stage(stage);
        }
    }

    pub fn growth(&self) -> f32 {
        self.growth.value()
    }

    pub fn opacity(&self) -> f32 {
        self.material.uniforms.opacity
    }
}

impl Animated for TreeEntity {
    fn update(&mut self, tick: &FrameTick, signal: &ExperienceSignal) {
        self.material.uniforms.time = tick.time;

        let target = if self.lights_on {
            1.0
        } else {
            LIGHTS_OFF_OPACITY
        };
        let opacity = &mut self.material.uniforms.opacity;
        *opacity = lerp(*opacity, target, OPACITY_RATE);

        self.growth.follow(signal);
        self.material.uniforms.growth = if self.reveal_with_growth {
            self.growth.value()
        } else {
            1.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinsel_core::Color;
    use tinsel_particles::ParticleRng;

    fn tree() -> TreeEntity {
        let shape = TreeShape {
            particle_count: 2_000,
            ..Default::default()
        };
        let palette = ShadingPalette::new(Color::from_hex(0x024025), Color::from_hex(0xffaa00));
        TreeEntity::new(shape, &palette, &mut ParticleRng::new(1))
    }

    fn run(tree: &mut TreeEntity, frames: u32, signal: ExperienceSignal) {
        for i in 0..frames {
            let tick = FrameTick {
                time: i as f32 / 60.0,
                delta: 1.0 / 60.0,
                frame: i as u64,
            };
            tree.update(&tick, &signal);
        }
    }

    #[test]
    fn always_shown_by_default() {
        let mut t = tree();
        run(&mut t, 1, ExperienceSignal::default());
        assert_eq!(t.material.uniforms.growth, 1.0);
    }

    #[test]
    fn follows_growth_when_enabled() {
        let mut t = tree();
        t.set_reveal_with_growth(true);
        run(&mut t, 10, ExperienceSignal { active: true, trigger: 1 });
        let g = t.material.uniforms.growth;
        assert!(g > 0.0 && g < 1.0);
        assert_eq!(g, t.growth());
    }

    #[test]
    fn lights_off_fades_toward_floor() {
        let mut t = tree();
        t.set_lights(false);
        run(&mut t, 300, ExperienceSignal::default());
        assert!((t.opacity() - LIGHTS_OFF_OPACITY).abs() < 1e-3);
        t.set_lights(true);
        run(&mut t, 1, ExperienceSignal::default());
        assert!(t.opacity() > LIGHTS_OFF_OPACITY);
    }

    #[test]
    fn regenerate_replaces_set() {
        let mut t = tree();
        let before = t.particles().len();
        let shape = TreeShape {
            particle_count: 500,
            ..Default::default()
        };
        let palette = ShadingPalette::new(Color::from_hex(0x550000), Color::from_hex(0xffffff));
        t.regenerate(shape, &palette, &mut ParticleRng::new(2));
        assert!(t.particles().len() < before);
        assert!(t.particles().len() <= 500);
    }

    #[test]
    fn glitter_toggles() {
        let mut t = tree();
        t.set_glitter(Some(SparkleStage::default()));
        assert_eq!(t.material.stage_names(), vec!["sparkle"]);
        t.set_glitter(None);
        assert!(t.material.stage_names().is_empty());
    }
}

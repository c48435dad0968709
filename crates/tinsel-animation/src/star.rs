//! Tree-top star: spins in place and scales in during the last stretch of growth

use crate::growth::{GrowthState, RATE_SLOW};
use crate::reveal::{RevealBand, HIDDEN_EPSILON};
use crate::vertex::{sparkle_material, SparkleProgram};
use crate::Animated;
use tinsel_core::{Color, Transform, Vec3};
use tinsel_particles::star::{
    create_star_mesh, generate_star_sparkles, StarMesh, STAR_DEPTH, STAR_INNER_RADIUS,
    STAR_OUTER_RADIUS, STAR_POINTS,
};
use tinsel_particles::{ParticleSet, PointMaterial, RandomSample};
use tinsel_runtime::{ExperienceSignal, FrameTick};

/// Growth the star waits for before it starts to appear
pub const STAR_REVEAL_KEY: f32 = 0.95;
/// Spin rate in radians per second
pub const SPIN_RATE: f32 = 0.5;
/// Point light intensity at full scale
pub const LIGHT_INTENSITY: f32 = 8.0;

pub struct StarEntity {
    pub mesh: StarMesh,
    sparkles: ParticleSet,
    pub sparkle_material: PointMaterial<SparkleProgram>,
    pub color: Color,
    growth: GrowthState,
    height: f32,
    rotation_y: f32,
    scale: f32,
}

impl StarEntity {
    pub fn new<R: RandomSample>(height: f32, color: Color, rng: &mut R) -> Self {
        Self {
            mesh: create_star_mesh(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS, STAR_DEPTH),
            sparkles: generate_star_sparkles(rng),
            sparkle_material: sparkle_material(color),
            color,
            growth: GrowthState::new(RATE_SLOW),
            height,
            rotation_y: 0.0,
            scale: 0.0,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.sparkle_material.uniforms.color = color;
    }

    /// Star sits on the apex of the tree
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn sparkles(&self) -> &ParticleSet {
        &self.sparkles
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn growth(&self) -> f32 {
        self.growth.value()
    }

    pub fn light_intensity(&self) -> f32 {
        LIGHT_INTENSITY * self.scale
    }

    /// Same cut-off as every other revealed element
    pub fn is_visible(&self) -> bool {
        self.scale > HIDDEN_EPSILON
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(Vec3::new(0.0, self.height, 0.0))
            .with_rotation(Transform::yaw(self.rotation_y))
            .with_scale(Vec3::splat(self.scale))
    }
}

impl Animated for StarEntity {
    fn update(&mut self, tick: &FrameTick, signal: &ExperienceSignal) {
        let growth = self.growth.follow(signal);
        self.scale = RevealBand::STAR.visibility(STAR_REVEAL_KEY, growth);
        self.rotation_y += tick.delta * SPIN_RATE;

        self.sparkle_material.uniforms.time = tick.time;
        self.sparkle_material.uniforms.scale = self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinsel_particles::ParticleRng;

    fn star() -> StarEntity {
        StarEntity::new(12.0, Color::from_hex(0xffaa00), &mut ParticleRng::new(5))
    }

    fn run(star: &mut StarEntity, frames: u64, signal: ExperienceSignal) {
        for frame in 0..frames {
            let tick = FrameTick {
                time: frame as f32 / 60.0,
                delta: 1.0 / 60.0,
                frame,
            };
            star.update(&tick, &signal);
        }
    }

    #[test]
    fn mesh_and_sparkles_built() {
        let s = star();
        assert_eq!(s.mesh.vertex_count(), 12);
        assert_eq!(s.mesh.triangle_count(), 20);
        assert_eq!(s.sparkles().len(), 40);
    }

    #[test]
    fn sliver_of_scale_counts_as_hidden() {
        let mut s = star();
        s.scale = 0.005;
        assert!(!s.is_visible());
        s.scale = 0.02;
        assert!(s.is_visible());
    }

    #[test]
    fn hidden_until_late_growth() {
        let mut s = star();
        let on = ExperienceSignal { active: true, trigger: 1 };
        // 1 - 0.99^200 ≈ 0.866
        run(&mut s, 200, on);
        assert_eq!(s.scale(), 0.0);
        assert!(!s.is_visible());
        assert_eq!(s.light_intensity(), 0.0);

        run(&mut s, 600, on);
        assert!(s.scale() > 0.9);
        assert!((s.light_intensity() - 8.0 * s.scale()).abs() < 1e-6);
        assert_eq!(s.sparkle_material.uniforms.scale, s.scale());
    }

    #[test]
    fn spins_at_half_radian_per_second() {
        let mut s = star();
        run(&mut s, 120, ExperienceSignal::default());
        assert!((s.rotation_y() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn transform_sits_on_apex() {
        let mut s = star();
        s.set_height(9.0);
        let t = s.transform();
        assert_eq!(t.position, Vec3::new(0.0, 9.0, 0.0));
        assert_eq!(t.scale, Vec3::splat(0.0));
    }

    #[test]
    fn recolor_updates_sparkles() {
        let mut s = star();
        let c = Color::from_hex(0x00ffff);
        s.set_color(c);
        assert_eq!(s.sparkle_material.uniforms.color, c);
    }
}

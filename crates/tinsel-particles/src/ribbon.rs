//! Helical ribbon wrapped around the tree cone.
//!
//! A center line spirals from near the base to just under the star, hugging
//! the cone with a small radial wave and a drape dip between wraps. Each path
//! sample is thickened into a short cloud of jittered particles. The reveal key
//! is path progress, so the ribbon draws itself from the bottom up.

use crate::particle::{Particle, ParticleCategory, ParticleSet};
use crate::rand::RandomSample;
use crate::tree::TreeShape;
use std::f32::consts::{FRAC_PI_4, PI, TAU};
use tinsel_core::math::lerp;

/// Helix parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonPath {
    pub loops: f32,
    pub start_y: f32,
    pub end_y: f32,
    pub angle_offset: f32,
    /// Path samples are taken at `i / segments` for `i` in `0..=segments`
    pub segments: u32,
    pub particles_per_segment: u32,
    pub drape_frequency: f32,
    pub drape_amplitude: f32,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    /// Clearance between the cone and the ribbon center line
    pub surface_gap: f32,
    /// Radial jitter width; vertical is half of this
    pub spread: f32,
    /// Angular jitter width in radians
    pub angular_spread: f32,
}

impl Default for RibbonPath {
    fn default() -> Self {
        Self {
            loops: 5.5,
            start_y: 1.0,
            end_y: 12.0 - 1.2,
            angle_offset: FRAC_PI_4,
            segments: 1200,
            particles_per_segment: 8,
            drape_frequency: 12.0,
            drape_amplitude: 0.15,
            wave_amplitude: 0.05,
            wave_frequency: 6.0,
            surface_gap: 0.05,
            spread: 0.15,
            angular_spread: 0.2,
        }
    }
}

/// One sample of the ribbon's center line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub radius: f32,
    pub angle: f32,
    pub y: f32,
}

impl RibbonPath {
    /// Path ending just under the apex of `shape`
    pub fn for_tree(shape: &TreeShape) -> Self {
        Self {
            end_y: shape.height - 1.2,
            ..Default::default()
        }
    }

    pub fn particle_count(&self) -> usize {
        (self.segments as usize + 1) * self.particles_per_segment as usize
    }

    /// Center line at progress `t` in [0, 1]
    pub fn sample(&self, shape: &TreeShape, t: f32) -> PathSample {
        let y = lerp(self.start_y, self.end_y, t);
        let cone_r = shape.cone_radius(y / shape.height);

        let loops_done = t * self.loops;
        let angle = loops_done * TAU + self.angle_offset;
        let drape = -(loops_done * PI * self.drape_frequency).sin().abs() * self.drape_amplitude;
        let wave = self.wave_amplitude * (loops_done * PI * self.wave_frequency).sin();

        PathSample {
            radius: cone_r + self.surface_gap + wave,
            angle,
            y: y + drape,
        }
    }
}

/// Generate the ribbon particle set.
///
/// Particles are stored white; the ribbon color is a material uniform so that
/// recoloring never regenerates geometry.
pub fn generate_ribbon<R: RandomSample>(
    path: &RibbonPath,
    shape: &TreeShape,
    rng: &mut R,
) -> ParticleSet {
    let mut set = ParticleSet::with_capacity(path.particle_count());
    set.set_requested(path.particle_count());
    let segments = path.segments.max(1);

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let center = path.sample(shape, t);
        if !center.radius.is_finite() {
            continue;
        }

        for _ in 0..path.particles_per_segment {
            let r = center.radius + rng.centered(path.spread * 0.5);
            let y = center.y + rng.centered(path.spread * 0.25);
            let angle = center.angle + rng.centered(path.angular_spread * 0.5);

            set.push(Particle {
                position: [r * angle.cos(), y, r * angle.sin()],
                color: [1.0, 1.0, 1.0],
                size: rng.range(2.0, 6.0),
                random: 0.0,
                phase: rng.range(0.0, 10.0),
                speed: 0.0,
                category: ParticleCategory::Body,
                reveal_key: t,
            });
        }
    }

    log::debug!(
        "[ribbon] emitted {} of {} particles",
        set.len(),
        set.requested()
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::ParticleRng;

    #[test]
    fn emits_full_count() {
        let path = RibbonPath::default();
        let set = generate_ribbon(&path, &TreeShape::default(), &mut ParticleRng::new(1));
        assert_eq!(path.particle_count(), 1201 * 8);
        assert_eq!(set.len(), path.particle_count());
        assert!(set.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn progress_keys_run_base_to_tip() {
        let path = RibbonPath::default();
        let set = generate_ribbon(&path, &TreeShape::default(), &mut ParticleRng::new(2));
        let keys = set.reveal_keys();
        assert_eq!(keys[0], 0.0);
        assert_eq!(keys[keys.len() - 1], 1.0);
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn path_hugs_the_cone() {
        let path = RibbonPath::default();
        let shape = TreeShape::default();
        for i in 0..=50 {
            let t = i as f32 / 50.0;
            let s = path.sample(&shape, t);
            let y = lerp(path.start_y, path.end_y, t);
            let cone = shape.cone_radius(y / shape.height);
            assert!((s.radius - cone).abs() <= path.surface_gap + path.wave_amplitude + 1e-5);
            // Drape only ever pulls down
            assert!(s.y <= y + 1e-6);
            assert!(s.y >= y - path.drape_amplitude - 1e-6);
        }
    }

    #[test]
    fn path_endpoints() {
        let path = RibbonPath::default();
        let shape = TreeShape::default();
        let start = path.sample(&shape, 0.0);
        assert!((start.y - 1.0).abs() < 1e-6);
        assert!((start.angle - FRAC_PI_4).abs() < 1e-6);
        let end = path.sample(&shape, 1.0);
        assert!((end.angle - (5.5 * TAU + FRAC_PI_4)).abs() < 1e-4);
    }

    #[test]
    fn jitter_stays_within_spread() {
        let path = RibbonPath {
            segments: 40,
            ..Default::default()
        };
        let shape = TreeShape::default();
        let set = generate_ribbon(&path, &shape, &mut ParticleRng::new(3));
        for p in set.iter() {
            let center = path.sample(&shape, p.reveal_key);
            let r = (p.position[0].powi(2) + p.position[2].powi(2)).sqrt();
            assert!((r - center.radius).abs() <= path.spread * 0.5 + 1e-4);
            assert!((p.position[1] - center.y).abs() <= path.spread * 0.25 + 1e-4);
            assert!((2.0..6.0).contains(&p.size));
        }
    }
}

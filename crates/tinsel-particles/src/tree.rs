//! Layered conifer sampler.
//!
//! Heights come from inverse-transform sampling (`y = (1 - sqrt(u)) · H`) so
//! density follows a cone's cross-section. Each point is then pushed out to a
//! fraction of a silhouette radius built from three factors: the cone itself,
//! a repeating per-layer branch profile, and an angular ripple that splits
//! each layer into branches.

use crate::particle::{Particle, ParticleCategory, ParticleSet};
use crate::rand::RandomSample;
use crate::shading::{self, ShadingPalette};
use std::f32::consts::PI;
use tinsel_core::math::fract;

/// Silhouettes thinner than this are discarded
pub const MIN_RADIUS: f32 = 0.001;
/// Share of depth draws biased toward the branch surface
const SURFACE_BIAS_SHARE: f32 = 0.8;
/// Exponent for the surface-biased depth draw
const SURFACE_BIAS_EXP: f32 = 0.3;

/// Shape-affecting tree constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    pub particle_count: usize,
    pub height: f32,
    pub base_radius: f32,
    pub layers: u32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            particle_count: 45_000,
            height: 12.0,
            base_radius: 5.0,
            layers: 16,
        }
    }
}

impl TreeShape {
    pub fn layer_height(&self) -> f32 {
        self.height / self.layers.max(1) as f32
    }

    /// Radius of the bare cone at normalized height `h`
    pub fn cone_radius(&self, h: f32) -> f32 {
        self.base_radius * (1.0 - h)
    }

    /// Position within the current layer, in [0, 1)
    pub fn layer_t(&self, y: f32) -> f32 {
        fract(y / self.layer_height())
    }

    /// Branch tier profile for a position within a layer
    pub fn branch_profile(layer_t: f32) -> f32 {
        let sine = (layer_t * PI * 0.85).sin().max(0.0);
        0.2 + 0.8 * sine.powf(1.2)
    }

    /// More, finer branches toward the base
    pub fn branch_count(h: f32) -> f32 {
        (9.0 * (1.0 - h * 0.6) + 4.0).floor()
    }

    /// Silhouette radius at height `y` and angle `theta`
    pub fn max_radius(&self, y: f32, theta: f32) -> f32 {
        let h = y / self.height;
        let profile = Self::branch_profile(self.layer_t(y));
        let radial_wave = (theta * Self::branch_count(h) + y * 0.5).cos();
        self.cone_radius(h) * profile * (0.7 + 0.3 * radial_wave)
    }
}

/// Decide a particle's category from its surface distance and two draws.
///
/// Bulbs need `dist > 0.85` and `bulb_draw > 0.97` (3%); tips need
/// `dist > 0.9` and `tip_draw > 0.85` (15%). Bulbs win when both hold.
pub fn classify(dist_from_surface: f32, bulb_draw: f32, tip_draw: f32) -> ParticleCategory {
    if dist_from_surface > 0.85 && bulb_draw > 0.97 {
        ParticleCategory::Ornament
    } else if dist_from_surface > 0.9 && tip_draw > 0.85 {
        ParticleCategory::Tip
    } else {
        ParticleCategory::Body
    }
}

/// Generate the tree particle set.
///
/// The requested count is a target: draws that land on a degenerate radius or
/// produce a non-finite attribute are dropped, so the emitted count is a little
/// lower.
pub fn generate_tree<R: RandomSample>(
    shape: &TreeShape,
    palette: &ShadingPalette,
    rng: &mut R,
) -> ParticleSet {
    let mut set = ParticleSet::with_capacity(shape.particle_count);
    set.set_requested(shape.particle_count);

    for _ in 0..shape.particle_count {
        let y = (1.0 - rng.next_f32().sqrt()) * shape.height;
        let h = y / shape.height;
        if !(0.0..=1.0).contains(&h) {
            continue;
        }

        let theta = rng.angle();
        let max_r = shape.max_radius(y, theta);
        if max_r < MIN_RADIUS {
            continue;
        }

        let mut r_ratio = rng.next_f32().powf(SURFACE_BIAS_EXP);
        if !rng.chance(SURFACE_BIAS_SHARE) {
            r_ratio = rng.next_f32();
        }
        let r = max_r * r_ratio;
        let dist = r / max_r;

        let bulb_draw = rng.next_f32();
        let tip_draw = rng.next_f32();
        let category = classify(dist, bulb_draw, tip_draw);

        let (color, size) = match category {
            ParticleCategory::Ornament => {
                let size = rng.range(4.0, 6.5);
                (shading::bulb_color(rng.next_f32()), size)
            }
            ParticleCategory::Tip => {
                let size = rng.range(1.0, 3.5);
                (shading::tip_color(palette, rng.next_f32()), size)
            }
            ParticleCategory::Body => {
                let size = rng.range(1.0, 3.5);
                (shading::body_color(palette, h, dist, r_ratio), size)
            }
        };

        set.push(Particle {
            position: [r * theta.cos(), y, r * theta.sin()],
            color: color.to_rgb(),
            size,
            random: rng.next_f32(),
            phase: rng.angle(),
            speed: 0.0,
            category,
            reveal_key: h,
        });
    }

    log::debug!(
        "[tree] emitted {} of {} particles ({} bulbs)",
        set.len(),
        set.requested(),
        set.count_category(ParticleCategory::Ornament)
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::ParticleRng;
    use tinsel_core::Color;

    fn palette() -> ShadingPalette {
        ShadingPalette::new(Color::from_hex(0x024025), Color::from_hex(0xffaa00))
    }

    fn small_shape() -> TreeShape {
        TreeShape {
            particle_count: 8_000,
            ..Default::default()
        }
    }

    #[test]
    fn all_attributes_finite_and_colors_non_negative() {
        let mut rng = ParticleRng::new(42);
        let set = generate_tree(&small_shape(), &palette(), &mut rng);
        for p in set.iter() {
            assert!(p.is_finite());
            for c in p.color {
                assert!(c >= 0.0, "negative channel {c}");
            }
        }
    }

    #[test]
    fn yield_ratio_is_high() {
        let mut rng = ParticleRng::new(7);
        let set = generate_tree(&small_shape(), &palette(), &mut rng);
        assert!(set.len() <= 8_000);
        assert!(set.yield_ratio() > 0.9, "yield {}", set.yield_ratio());
    }

    #[test]
    fn reveal_keys_are_normalized_heights() {
        let shape = small_shape();
        let mut rng = ParticleRng::new(3);
        let set = generate_tree(&shape, &palette(), &mut rng);
        for p in set.iter() {
            assert!((0.0..=1.0).contains(&p.reveal_key));
            assert!((p.reveal_key - p.position[1] / shape.height).abs() < 1e-5);
        }
    }

    #[test]
    fn density_biased_toward_base() {
        let shape = small_shape();
        let mut rng = ParticleRng::new(11);
        let set = generate_tree(&shape, &palette(), &mut rng);
        let lower = set.reveal_keys().iter().filter(|h| **h < 0.5).count();
        let upper = set.len() - lower;
        // A cone holds 3/4 of its volume in the bottom half
        assert!(lower > upper * 2, "lower {lower} upper {upper}");
    }

    #[test]
    fn particles_stay_inside_silhouette() {
        let shape = small_shape();
        let mut rng = ParticleRng::new(5);
        let set = generate_tree(&shape, &palette(), &mut rng);
        for p in set.iter() {
            let [x, y, z] = p.position;
            let r = (x * x + z * z).sqrt();
            assert!(r <= shape.cone_radius(y / shape.height) + 1e-3);
        }
    }

    #[test]
    fn bulbs_sit_near_the_surface() {
        let shape = small_shape();
        let mut rng = ParticleRng::new(9);
        let set = generate_tree(&shape, &palette(), &mut rng);
        let mut bulbs = 0;
        for p in set.iter().filter(|p| p.category == ParticleCategory::Ornament) {
            let [x, y, z] = p.position;
            let max_r = shape.max_radius(y, z.atan2(x));
            let dist = (x * x + z * z).sqrt() / max_r;
            assert!(dist > 0.85 - 1e-3, "bulb at depth {dist}");
            assert!(p.size >= 4.0);
            bulbs += 1;
        }
        assert!(bulbs > 0);
    }

    #[test]
    fn most_particles_sit_in_the_outer_half() {
        let shape = small_shape();
        let mut rng = ParticleRng::new(13);
        let set = generate_tree(&shape, &palette(), &mut rng);
        let outer = set
            .iter()
            .filter(|p| {
                let [x, y, z] = p.position;
                (x * x + z * z).sqrt() / shape.max_radius(y, z.atan2(x)) > 0.5
            })
            .count();
        // 80% surface-biased draws land past the midpoint 90% of the time,
        // the uniform 20% half the time
        let share = outer as f32 / set.len() as f32;
        assert!(share > 0.75 && share < 0.9, "outer share {share}");
    }

    #[test]
    fn classify_follows_thresholds() {
        assert_eq!(classify(0.86, 0.98, 0.0), ParticleCategory::Ornament);
        assert_eq!(classify(0.84, 0.98, 0.99), ParticleCategory::Body);
        assert_eq!(classify(0.95, 0.5, 0.9), ParticleCategory::Tip);
        assert_eq!(classify(0.88, 0.5, 0.9), ParticleCategory::Body);
        assert_eq!(classify(0.95, 0.99, 0.99), ParticleCategory::Ornament);
    }

    #[test]
    fn same_seed_same_tree() {
        let shape = TreeShape {
            particle_count: 500,
            ..Default::default()
        };
        let a = generate_tree(&shape, &palette(), &mut ParticleRng::new(77));
        let b = generate_tree(&shape, &palette(), &mut ParticleRng::new(77));
        assert_eq!(a.len(), b.len());
        assert_eq!(a.categories(), b.categories());
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn branch_profile_range() {
        for i in 0..100 {
            let p = TreeShape::branch_profile(i as f32 / 100.0);
            assert!((0.2..=1.0).contains(&p));
        }
    }

    #[test]
    fn branch_count_shrinks_with_height() {
        assert_eq!(TreeShape::branch_count(0.0), 13.0);
        assert!(TreeShape::branch_count(1.0) < TreeShape::branch_count(0.0));
    }

    proptest::proptest! {
        #[test]
        fn classify_is_consistent(dist in 0.0f32..=1.0, bulb in 0.0f32..1.0, tip in 0.0f32..1.0) {
            let category = classify(dist, bulb, tip);
            let bulb_hit = dist > 0.85 && bulb > 0.97;
            let tip_hit = dist > 0.9 && tip > 0.85;
            proptest::prop_assert_eq!(category == ParticleCategory::Ornament, bulb_hit);
            proptest::prop_assert_eq!(category == ParticleCategory::Tip, !bulb_hit && tip_hit);
        }

        #[test]
        fn body_color_never_negative(h in 0.0f32..=1.0, dist in 0.0f32..=1.0, r in 0.0f32..=1.0) {
            let c = shading::body_color(&palette(), h, dist, r);
            proptest::prop_assert!(c.is_finite());
            proptest::prop_assert!(c.r >= 0.0 && c.g >= 0.0 && c.b >= 0.0);
        }

        #[test]
        fn max_radius_within_cone(y in 0.0f32..12.0, theta in 0.0f32..std::f32::consts::TAU) {
            let shape = TreeShape::default();
            let r = shape.max_radius(y, theta);
            proptest::prop_assert!(r >= 0.0);
            proptest::prop_assert!(r <= shape.cone_radius(y / shape.height) + 1e-5);
        }
    }
}

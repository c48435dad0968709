//! Point-sprite materials as composable shading stages.
//!
//! A [`PointMaterial`] pairs a base [`VertexProgram`] with a uniform block and
//! an ordered list of extra [`ShadingStage`]s. Stages see the base program's
//! output and can only restyle it (color, alpha, scale); they never move the
//! point. The GPU path mirrors this one-to-one, so the CPU evaluation doubles
//! as the reference for tests and headless runs.

use crate::particle::Particle;
use std::fmt;
use tinsel_core::math::{fract, smoothstep};
use tinsel_core::Color;

/// Particle blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleBlendMode {
    Alpha,
    Additive,
}

/// Uniform block shared by every point material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// Elapsed seconds
    pub time: f32,
    pub opacity: f32,
    /// Owning entity's growth scalar
    pub growth: f32,
    pub color: Color,
    /// Whole-material scale (star appear animation)
    pub scale: f32,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            opacity: 1.0,
            growth: 1.0,
            color: Color::WHITE,
            scale: 1.0,
        }
    }
}

/// Output of a vertex program for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointShade {
    /// Displaced position in the entity's local frame
    pub position: [f32; 3],
    pub color: Color,
    /// Final alpha, visibility already folded in
    pub alpha: f32,
    /// Size multiplier applied on top of the particle's base size
    pub scale: f32,
}

impl PointShade {
    pub fn at_rest(p: &Particle) -> Self {
        Self {
            position: p.position,
            color: Color::rgb(p.color[0], p.color[1], p.color[2]),
            alpha: 1.0,
            scale: 1.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && self.scale > 0.0
    }
}

/// A fully evaluated point ready for rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedPoint {
    pub shade: PointShade,
    /// Screen-space point size in pixels
    pub point_size: f32,
}

/// The base per-particle program of a material
pub trait VertexProgram {
    fn name(&self) -> &str;
    fn shade(&self, uniforms: &Uniforms, particle: &Particle) -> PointShade;
}

/// An extra stage layered after the base program
pub trait ShadingStage: fmt::Debug {
    fn name(&self) -> &str;
    fn apply(&self, uniforms: &Uniforms, particle: &Particle, shade: PointShade) -> PointShade;
}

/// Procedural glitter: a hash-selected subset of points flashes toward `tint`,
/// reshuffled `frequency` times per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleStage {
    /// Share of points glinting at any moment, in [0, 1]
    pub intensity: f32,
    pub frequency: f32,
    pub tint: Color,
}

impl Default for SparkleStage {
    fn default() -> Self {
        Self {
            intensity: 0.04,
            frequency: 2.0,
            tint: Color::rgb(3.0, 3.0, 2.7),
        }
    }
}

impl SparkleStage {
    /// Glint weight in [0, 1] for a particle at a time
    pub fn glint(&self, time: f32, particle: &Particle) -> f32 {
        if self.intensity <= 0.0 {
            return 0.0;
        }
        let epoch = (time * self.frequency).floor();
        let seed = particle.phase * 12.9898 + particle.random * 78.233 + epoch * 0.618;
        let flicker = fract(seed.sin() * 43758.5453);
        smoothstep(1.0 - self.intensity.min(1.0), 1.0, flicker)
    }
}

impl ShadingStage for SparkleStage {
    fn name(&self) -> &str {
        "sparkle"
    }

    fn apply(&self, uniforms: &Uniforms, particle: &Particle, mut shade: PointShade) -> PointShade {
        if !shade.is_visible() {
            return shade;
        }
        let g = self.glint(uniforms.time, particle);
        shade.color = shade.color.lerp(self.tint, g);
        shade.alpha = shade.alpha.max(g * uniforms.opacity);
        shade
    }
}

/// Base program plus uniforms and optional stages
pub struct PointMaterial<P> {
    pub program: P,
    pub uniforms: Uniforms,
    pub blend_mode: ParticleBlendMode,
    pub depth_write: bool,
    /// Size attenuation numerator: `size · scale · distance_factor / depth`
    pub distance_factor: f32,
    pub max_point_size: f32,
    stages: Vec<Box<dyn ShadingStage>>,
}

impl<P: VertexProgram> PointMaterial<P> {
    /// Additive, no depth writes: the setup every glowing point system uses
    pub fn additive(program: P, distance_factor: f32) -> Self {
        Self {
            program,
            uniforms: Uniforms::default(),
            blend_mode: ParticleBlendMode::Additive,
            depth_write: false,
            distance_factor,
            max_point_size: 300.0,
            stages: Vec::new(),
        }
    }

    pub fn with_blend_mode(mut self, blend_mode: ParticleBlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn with_max_point_size(mut self, max: f32) -> Self {
        self.max_point_size = max;
        self
    }

    pub fn with_stage(mut self, stage: impl ShadingStage + 'static) -> Self {
        self.push_stage(stage);
        self
    }

    pub fn push_stage(&mut self, stage: impl ShadingStage + 'static) {
        self.stages.push(Box::new(stage));
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn clear_stages(&mut self) {
        self.stages.clear();
    }

    /// Run the base program then every stage in order
    pub fn shade(&self, particle: &Particle) -> PointShade {
        let base = self.program.shade(&self.uniforms, particle);
        self.stages
            .iter()
            .fold(base, |shade, stage| stage.apply(&self.uniforms, particle, shade))
    }

    /// Screen-space size for a point at view depth `depth` (distance along the
    /// view axis); depths under 1.0 are treated as 1.0.
    pub fn point_size(&self, size: f32, scale: f32, depth: f32) -> f32 {
        (size * scale * self.distance_factor / depth.max(1.0)).min(self.max_point_size)
    }

    /// Full evaluation of one particle
    pub fn evaluate(&self, particle: &Particle, depth: f32) -> ShadedPoint {
        let shade = self.shade(particle);
        ShadedPoint {
            point_size: self.point_size(particle.size, shade.scale, depth),
            shade,
        }
    }
}

impl<P: VertexProgram> fmt::Debug for PointMaterial<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointMaterial")
            .field("program", &self.program.name())
            .field("uniforms", &self.uniforms)
            .field("blend_mode", &self.blend_mode)
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Passthrough;

    impl VertexProgram for Passthrough {
        fn name(&self) -> &str {
            "passthrough"
        }

        fn shade(&self, uniforms: &Uniforms, particle: &Particle) -> PointShade {
            let mut s = PointShade::at_rest(particle);
            s.alpha = uniforms.opacity;
            s
        }
    }

    #[derive(Debug)]
    struct Halve;

    impl ShadingStage for Halve {
        fn name(&self) -> &str {
            "halve"
        }

        fn apply(&self, _u: &Uniforms, _p: &Particle, mut shade: PointShade) -> PointShade {
            shade.alpha *= 0.5;
            shade
        }
    }

    fn particle() -> Particle {
        Particle {
            position: [1.0, 2.0, 3.0],
            color: [0.2, 0.4, 0.6],
            size: 2.0,
            phase: 1.3,
            random: 0.7,
            ..Default::default()
        }
    }

    #[test]
    fn stages_run_in_order_after_base() {
        let material = PointMaterial::additive(Passthrough, 25.0)
            .with_stage(Halve)
            .with_stage(Halve);
        assert_eq!(material.stage_names(), vec!["halve", "halve"]);
        let shade = material.shade(&particle());
        assert!((shade.alpha - 0.25).abs() < 1e-6);
        assert_eq!(shade.position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn point_size_attenuates_and_clamps() {
        let material = PointMaterial::additive(Passthrough, 25.0);
        assert!((material.point_size(2.0, 1.0, 10.0) - 5.0).abs() < 1e-6);
        // Near the camera the divisor floors at 1
        assert!((material.point_size(2.0, 1.0, 0.1) - 50.0).abs() < 1e-6);
        assert_eq!(material.point_size(100.0, 1.0, 1.0), 300.0);
    }

    #[test]
    fn sparkle_glint_bounded_and_disabled_at_zero() {
        let stage = SparkleStage::default();
        for i in 0..200 {
            let g = stage.glint(i as f32 * 0.1, &particle());
            assert!((0.0..=1.0).contains(&g));
        }
        let off = SparkleStage {
            intensity: 0.0,
            ..Default::default()
        };
        assert_eq!(off.glint(3.0, &particle()), 0.0);
    }

    #[test]
    fn sparkle_glints_some_points() {
        let stage = SparkleStage {
            intensity: 0.3,
            ..Default::default()
        };
        let glinting = (0..500)
            .filter(|i| {
                let p = Particle {
                    phase: *i as f32 * 0.37,
                    random: (*i as f32 * 0.11).fract(),
                    ..Default::default()
                };
                stage.glint(0.0, &p) > 0.0
            })
            .count();
        assert!(glinting > 0 && glinting < 500);
    }

    #[test]
    fn sparkle_skips_hidden_points() {
        let material = PointMaterial::additive(Passthrough, 25.0).with_stage(SparkleStage {
            intensity: 1.0,
            ..Default::default()
        });
        let mut m = material;
        m.uniforms.opacity = 0.0;
        let shade = m.shade(&particle());
        assert_eq!(shade.alpha, 0.0);
    }
}

//! Per-particle vertex programs.
//!
//! Each program is the CPU form of one point material's vertex stage. Inputs
//! are the stored particle attributes plus the material's uniforms; stored
//! attributes are never modified.

use crate::reveal::RevealBand;
use tinsel_core::math::{glsl_mod, smoothstep};
use tinsel_core::Color;
use tinsel_particles::ambient::SNOW_HEIGHT;
use tinsel_particles::{
    ParticleBlendMode, Particle, ParticleCategory, PointMaterial, PointShade, Uniforms,
    VertexProgram,
};

/// Bulb highlight the blink mixes toward
const BULB_FLASH: Color = Color::rgb(1.0, 1.0, 0.9);
/// Ribbon sparkle peak, far past 1.0 for bloom
const RIBBON_FLASH: Color = Color::rgb(5.0, 5.0, 5.0);

/// Tree needles sway with height; bulbs blink in place
#[derive(Debug, Clone, Copy)]
pub struct TreeProgram {
    pub height: f32,
    pub band: RevealBand,
}

impl Default for TreeProgram {
    fn default() -> Self {
        Self {
            height: 12.0,
            band: RevealBand::PARTICLE_EDGE,
        }
    }
}

impl VertexProgram for TreeProgram {
    fn name(&self) -> &str {
        "tree"
    }

    fn shade(&self, u: &Uniforms, p: &Particle) -> PointShade {
        let t = u.time;
        let mut shade = PointShade::at_rest(p);
        let [x, y, z] = p.position;

        if p.category == ParticleCategory::Ornament {
            let blink = (t * 3.0 + p.phase * 15.0).sin();
            shade.scale = 1.0 + blink * 0.4;
            shade.color = shade.color.lerp(BULB_FLASH, blink.max(0.0) * 0.6);
            shade.alpha = 0.8 + 0.2 * blink;
        } else {
            let sway = (t + y * 0.3).sin() * 0.06 * (y / self.height);
            shade.position = [x + sway, y, z + sway * 0.5];
            shade.scale = 1.0 + (t * 2.0 + p.phase).sin() * 0.1;
            shade.alpha = 0.85 + 0.15 * (t * 5.0 + p.random * 10.0).sin();
        }

        shade.alpha *= self.band.visibility(p.reveal_key, u.growth) * u.opacity;
        shade
    }
}

/// Ribbon flows in a tiny circle and pulses toward HDR white
#[derive(Debug, Clone, Copy)]
pub struct RibbonProgram {
    pub band: RevealBand,
}

impl Default for RibbonProgram {
    fn default() -> Self {
        Self {
            band: RevealBand::PARTICLE_EDGE,
        }
    }
}

impl VertexProgram for RibbonProgram {
    fn name(&self) -> &str {
        "ribbon"
    }

    fn shade(&self, u: &Uniforms, p: &Particle) -> PointShade {
        let t = u.time;
        let visibility = self.band.visibility(p.reveal_key, u.growth);
        let [x, y, z] = p.position;
        let wobble = t * 5.0 + p.phase;

        let pulse = (t * 4.0 + p.phase * 2.0).sin();
        let sparkle = smoothstep(0.4, 1.0, pulse);

        PointShade {
            position: [x + wobble.sin() * 0.02, y, z + wobble.cos() * 0.02],
            color: (u.color * 2.0).lerp(RIBBON_FLASH, sparkle * 0.7),
            alpha: visibility * (0.8 + 0.2 * pulse) * u.opacity,
            scale: (1.0 + 0.3 * pulse) * visibility,
        }
    }
}

/// Star sparkles pulse with the star's appear scale
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkleProgram;

impl VertexProgram for SparkleProgram {
    fn name(&self) -> &str {
        "star-sparkle"
    }

    fn shade(&self, u: &Uniforms, p: &Particle) -> PointShade {
        let pulse = (u.time * 4.0 + p.phase).sin();
        let shown = if u.scale >= 0.01 { 1.0 } else { 0.0 };
        PointShade {
            position: p.position,
            color: u.color.lerp(Color::WHITE, smoothstep(0.5, 1.0, pulse)),
            alpha: (0.5 + 0.5 * pulse) * shown,
            scale: (1.0 + 0.4 * pulse) * u.scale,
        }
    }
}

/// Snow falls through a wrapping column with wind and flutter
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowProgram;

impl VertexProgram for SnowProgram {
    fn name(&self) -> &str {
        "snow"
    }

    fn shade(&self, u: &Uniforms, p: &Particle) -> PointShade {
        let [x, y, z] = p.position;
        let fall = 3.0 * p.speed;
        let y = glsl_mod(y - u.time * fall, SNOW_HEIGHT) - SNOW_HEIGHT / 2.0 + 10.0;

        let t = u.time * 0.5;
        let x = x + (t + y * 0.05).sin() * 2.0 + (t * 3.0 + p.random * 10.0).cos() * 0.5;
        let z = z + (t * 2.0 + p.random * 5.0).sin() * 0.5;

        PointShade {
            position: [x, y, z],
            color: u.color,
            alpha: 0.9 * u.opacity,
            scale: 1.0,
        }
    }
}

/// Distant stars twinkle in brightness and size
#[derive(Debug, Clone, Copy, Default)]
pub struct StarfieldProgram;

impl VertexProgram for StarfieldProgram {
    fn name(&self) -> &str {
        "starfield"
    }

    fn shade(&self, u: &Uniforms, p: &Particle) -> PointShade {
        let twinkle = (u.time * p.speed + p.phase).sin();
        let mut shade = PointShade::at_rest(p);
        shade.alpha = (0.65 + 0.35 * twinkle) * u.opacity;
        shade.scale = 1.0 + 0.5 * twinkle;
        shade
    }
}

/// Gold motes rise over a ten-second life while slowly swirling
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicProgram;

impl MagicProgram {
    pub const LIFE: f32 = 10.0;
}

impl VertexProgram for MagicProgram {
    fn name(&self) -> &str {
        "magic"
    }

    fn shade(&self, u: &Uniforms, p: &Particle) -> PointShade {
        let t = u.time;
        let [x, y, z] = p.position;
        let life = glsl_mod(t * p.speed + p.phase, Self::LIFE);

        let half_angle = (t * 0.2 + p.phase) * 0.5;
        let (s, c) = half_angle.sin_cos();

        let twinkle = (t * 3.0 + p.phase * 10.0).sin();
        let fade = 1.0 - ((life / Self::LIFE) * 2.0 - 1.0).abs();

        PointShade {
            position: [x * c - z * s, y + life, x * s + z * c],
            color: Color::rgb(p.color[0], p.color[1], p.color[2]),
            alpha: (0.5 + 0.5 * twinkle) * fade * u.opacity,
            scale: 1.0,
        }
    }
}

pub fn tree_material(height: f32) -> PointMaterial<TreeProgram> {
    PointMaterial::additive(
        TreeProgram {
            height,
            ..Default::default()
        },
        25.0,
    )
}

pub fn ribbon_material(color: Color) -> PointMaterial<RibbonProgram> {
    let mut material = PointMaterial::additive(RibbonProgram::default(), 20.0);
    material.uniforms.color = color;
    material.uniforms.growth = 0.0;
    material
}

pub fn sparkle_material(color: Color) -> PointMaterial<SparkleProgram> {
    let mut material = PointMaterial::additive(SparkleProgram, 18.0).with_max_point_size(f32::MAX);
    material.uniforms.color = color;
    material.uniforms.scale = 0.0;
    material
}

pub fn snow_material() -> PointMaterial<SnowProgram> {
    PointMaterial::additive(SnowProgram, 50.0)
        .with_blend_mode(ParticleBlendMode::Alpha)
        .with_max_point_size(f32::MAX)
}

pub fn starfield_material() -> PointMaterial<StarfieldProgram> {
    PointMaterial::additive(StarfieldProgram, 300.0).with_max_point_size(f32::MAX)
}

pub fn magic_material() -> PointMaterial<MagicProgram> {
    PointMaterial::additive(MagicProgram, 20.0).with_max_point_size(250.0)
}

//! Ambient particle systems: snow, starfield, and magic motes.
//!
//! These never grow or reveal; all of their motion comes from the vertex
//! programs, so generation only lays down rest positions and per-particle
//! animation parameters.

use crate::particle::{Particle, ParticleCategory, ParticleSet};
use crate::rand::RandomSample;
use tinsel_core::Color;

/// Height of the snow column; flakes wrap around inside it
pub const SNOW_HEIGHT: f32 = 50.0;
/// Half-width of the snow box on x and z
pub const SNOW_HALF_WIDTH: f32 = 30.0;
/// Flakes emitted per unit of configured snow count
pub const SNOW_DENSITY: usize = 4;

pub const STAR_SHELL_INNER: f32 = 100.0;
pub const STAR_SHELL_OUTER: f32 = 300.0;
/// White, warm white, blue-ish, gold, reddish
pub const STAR_PALETTE: [u32; 5] = [0xffffff, 0xffe9c4, 0xd4fbff, 0xffd700, 0xffb7b2];

pub const MAGIC_COUNT: usize = 400;
/// Gold boosted past 1.0 for bloom
pub const MAGIC_COLOR: [f32; 3] = [2.0, 1.5, 0.2];

/// Snow: `SNOW_DENSITY × count` flakes in a 60×50×60 box
pub fn generate_snow<R: RandomSample>(count: usize, rng: &mut R) -> ParticleSet {
    let total = count * SNOW_DENSITY;
    let mut set = ParticleSet::with_capacity(total);
    set.set_requested(total);

    for _ in 0..total {
        let position = [
            rng.centered(SNOW_HALF_WIDTH),
            rng.range(0.0, SNOW_HEIGHT),
            rng.centered(SNOW_HALF_WIDTH),
        ];
        set.push(Particle {
            position,
            color: [1.0, 1.0, 1.0],
            speed: rng.range(0.3, 1.0),
            random: rng.next_f32(),
            size: rng.range(1.5, 5.0),
            phase: 0.0,
            category: ParticleCategory::Body,
            reveal_key: 0.0,
        });
    }

    log::debug!("[snow] emitted {} flakes", set.len());
    set
}

/// Starfield: `count` stars in a spherical shell around the scene
pub fn generate_starfield<R: RandomSample>(count: usize, rng: &mut R) -> ParticleSet {
    let mut set = ParticleSet::with_capacity(count);
    set.set_requested(count);

    for _ in 0..count {
        let r = rng.range(STAR_SHELL_INNER, STAR_SHELL_OUTER);
        let [dx, dy, dz] = rng.unit_direction();
        let color = Color::from_hex(STAR_PALETTE[rng.index(STAR_PALETTE.len())]);

        set.push(Particle {
            position: [r * dx, r * dy, r * dz],
            color: color.to_rgb(),
            size: rng.range(0.5, 2.5),
            phase: rng.angle(),
            speed: rng.range(0.5, 3.5),
            random: 0.0,
            category: ParticleCategory::Body,
            reveal_key: 0.0,
        });
    }

    log::debug!("[starfield] emitted {} stars", set.len());
    set
}

/// Magic motes: a fixed cloud of gold sparks rising around the lower tree
pub fn generate_magic<R: RandomSample>(rng: &mut R) -> ParticleSet {
    let mut set = ParticleSet::with_capacity(MAGIC_COUNT);
    set.set_requested(MAGIC_COUNT);

    for _ in 0..MAGIC_COUNT {
        let r = rng.range(1.0, 4.5);
        let theta = rng.angle();
        let y = rng.range(0.0, 6.0);

        set.push(Particle {
            position: [r * theta.cos(), y, r * theta.sin()],
            color: MAGIC_COLOR,
            size: rng.range(5.0, 15.0),
            phase: rng.range(0.0, 10.0),
            speed: rng.range(0.5, 1.0),
            random: 0.0,
            category: ParticleCategory::Body,
            reveal_key: 0.0,
        });
    }
    set
}

//! Random sources for generation.
//!
//! Two deliberately separate kinds:
//! - [`RandomSample`]: a one-shot stream (`ParticleRng`) for visual generation
//!   where the exact values never need to be reproduced across regenerations.
//! - [`DeterministicSample`]: a stateless hash of `(seed, index)` for anything
//!   whose placement must be stable, like photo ornaments.
//!
//! Placement code takes a `DeterministicSample` by value, so it cannot be fed
//! the shared stream by accident.

use std::f32::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

/// A stream of uniform draws in [0, 1)
pub trait RandomSample {
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform angle in [0, 2π)
    fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }

    /// Centered draw in [-half, half)
    fn centered(&mut self, half: f32) -> f32 {
        (self.next_f32() - 0.5) * 2.0 * half
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in [0, len)
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Uniform direction on the unit sphere (polar angle via `acos(2u - 1)`)
    fn unit_direction(&mut self) -> [f32; 3] {
        let theta = self.angle();
        let phi = (2.0 * self.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
        [
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        ]
    }
}

/// Lightweight xorshift32 PRNG
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the wall clock, for generation that should differ per session
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new((nanos ^ (nanos >> 32)) as u32)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSample for ParticleRng {
    /// Top 24 bits, so the result is strictly below 1.0
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Stateless hash-based sampler: `fract(sin(seed + n) * 43758.5453)`.
///
/// Evaluated in f64 so large seeds keep enough precision to stay decorrelated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeterministicSample {
    seed: f64,
}

impl DeterministicSample {
    pub const HASH_SCALE: f64 = 43758.5453;

    pub fn new(seed: f64) -> Self {
        Self { seed }
    }

    /// Seed derived from an element index and a fixed multiplier
    pub fn for_index(index: usize, multiplier: f64) -> Self {
        Self::new(index as f64 * multiplier)
    }

    /// Draw `n` of this sample, in [0, 1)
    pub fn at(&self, n: u32) -> f32 {
        let x = (self.seed + n as f64).sin() * Self::HASH_SCALE;
        let f = x - x.floor();
        // f64 fract can round to exactly 1.0 in f32
        (f as f32).min(1.0 - f32::EPSILON)
    }

    /// Draw `n` mapped to [min, max)
    pub fn range(&self, n: u32, min: f32, max: f32) -> f32 {
        min + self.at(n) * (max - min)
    }

    /// Draw `n` centered on zero, in [-half, half)
    pub fn centered(&self, n: u32, half: f32) -> f32 {
        (self.at(n) - 0.5) * 2.0 * half
    }
}

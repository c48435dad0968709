//! Snow, starfield and magic motes. None of these grow; they only need their
//! time uniform and a regeneration when their count changes.

use tinsel_animation::vertex::{
    magic_material, snow_material, starfield_material, MagicProgram, SnowProgram,
    StarfieldProgram,
};
use tinsel_particles::ambient::{generate_magic, generate_snow, generate_starfield};
use tinsel_particles::{ParticleSet, PointMaterial, RandomSample};

pub struct AmbientLayer {
    snow: ParticleSet,
    snow_count: usize,
    pub snow_material: PointMaterial<SnowProgram>,
    stars: ParticleSet,
    star_count: usize,
    pub starfield_material: PointMaterial<StarfieldProgram>,
    magic: ParticleSet,
    pub magic_material: PointMaterial<MagicProgram>,
    snow_enabled: bool,
    lights_on: bool,
}

impl AmbientLayer {
    pub fn new<R: RandomSample>(snow_count: usize, star_count: usize, rng: &mut R) -> Self {
        Self {
            snow: generate_snow(snow_count, rng),
            snow_count,
            snow_material: snow_material(),
            stars: generate_starfield(star_count, rng),
            star_count,
            starfield_material: starfield_material(),
            magic: generate_magic(rng),
            magic_material: magic_material(),
            snow_enabled: true,
            lights_on: true,
        }
    }

    /// Regenerate only the systems whose count changed. Returns which did.
    pub fn resize<R: RandomSample>(
        &mut self,
        snow_count: usize,
        star_count: usize,
        rng: &mut R,
    ) -> (bool, bool) {
        let snow = snow_count != self.snow_count;
        if snow {
            self.snow = generate_snow(snow_count, rng);
            self.snow_count = snow_count;
        }
        let stars = star_count != self.star_count;
        if stars {
            self.stars = generate_starfield(star_count, rng);
            self.star_count = star_count;
            log::info!("[starfield] regenerated with {} stars", star_count);
        }
        (snow, stars)
    }

    pub fn set_snow(&mut self, enabled: bool) {
        self.snow_enabled = enabled;
    }

    /// Magic motes only show with the lights on
    pub fn set_lights(&mut self, on: bool) {
        self.lights_on = on;
    }

    pub fn snow(&self) -> Option<&ParticleSet> {
        self.snow_enabled.then_some(&self.snow)
    }

    /// Always visible
    pub fn stars(&self) -> &ParticleSet {
        &self.stars
    }

    pub fn magic(&self) -> Option<&ParticleSet> {
        self.lights_on.then_some(&self.magic)
    }

    pub fn update(&mut self, time: f32) {
        self.snow_material.uniforms.time = time;
        self.starfield_material.uniforms.time = time;
        self.magic_material.uniforms.time = time;
    }
}

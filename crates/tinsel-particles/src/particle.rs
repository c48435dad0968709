//! Particle types: generated attribute sets and GPU instance data

use bytemuck::{Pod, Zeroable};

/// Drives which color rule and which animation rule a particle gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ParticleCategory {
    /// Needle mass: sways, gentle size pulse
    #[default]
    Body = 0,
    /// New-growth tips: body animation, brighter color
    Tip = 1,
    /// Light bulbs: blink instead of sway
    Ornament = 2,
}

impl ParticleCategory {
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Tip => "tip",
            Self::Ornament => "ornament",
        }
    }
}

/// One generated particle, before it is accepted into a [`ParticleSet`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub position: [f32; 3],
    /// Linear RGB, may exceed 1.0
    pub color: [f32; 3],
    pub size: f32,
    /// Uniform [0, 1) decorrelation offset
    pub random: f32,
    /// Animation phase offset
    pub phase: f32,
    /// Per-particle speed multiplier (ambient systems only)
    pub speed: f32,
    pub category: ParticleCategory,
    /// Threshold compared against the owning entity's growth scalar
    pub reveal_key: f32,
}

impl Particle {
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.color.iter().all(|v| v.is_finite())
            && self.size.is_finite()
            && self.random.is_finite()
            && self.phase.is_finite()
            && self.speed.is_finite()
            && self.reveal_key.is_finite()
    }
}

/// Immutable-after-generation attribute set, stored as parallel arrays
/// keyed by particle index.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    sizes: Vec<f32>,
    randoms: Vec<f32>,
    phases: Vec<f32>,
    speeds: Vec<f32>,
    categories: Vec<ParticleCategory>,
    reveal_keys: Vec<f32>,
    /// Number of particles the sampler attempted
    requested: usize,
}

impl ParticleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            sizes: Vec::with_capacity(capacity),
            randoms: Vec::with_capacity(capacity),
            phases: Vec::with_capacity(capacity),
            speeds: Vec::with_capacity(capacity),
            categories: Vec::with_capacity(capacity),
            reveal_keys: Vec::with_capacity(capacity),
            requested: 0,
        }
    }

    /// Accept a particle if every field is finite. Returns whether it was kept.
    pub fn push(&mut self, p: Particle) -> bool {
        if !p.is_finite() {
            return false;
        }
        self.positions.push(p.position);
        self.colors.push(p.color);
        self.sizes.push(p.size);
        self.randoms.push(p.random);
        self.phases.push(p.phase);
        self.speeds.push(p.speed);
        self.categories.push(p.category);
        self.reveal_keys.push(p.reveal_key);
        true
    }

    /// Record how many particles the sampler was asked for
    pub fn set_requested(&mut self, requested: usize) {
        self.requested = requested;
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Emitted / requested; 1.0 for sets with no recorded request
    pub fn yield_ratio(&self) -> f32 {
        if self.requested == 0 {
            1.0
        } else {
            self.len() as f32 / self.requested as f32
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn randoms(&self) -> &[f32] {
        &self.randoms
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    pub fn categories(&self) -> &[ParticleCategory] {
        &self.categories
    }

    pub fn reveal_keys(&self) -> &[f32] {
        &self.reveal_keys
    }

    /// Reassemble particle `i` from the parallel arrays
    pub fn get(&self, i: usize) -> Option<Particle> {
        if i >= self.len() {
            return None;
        }
        Some(Particle {
            position: self.positions[i],
            color: self.colors[i],
            size: self.sizes[i],
            random: self.randoms[i],
            phase: self.phases[i],
            speed: self.speeds[i],
            category: self.categories[i],
            reveal_key: self.reveal_keys[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn count_category(&self, category: ParticleCategory) -> usize {
        self.categories.iter().filter(|c| **c == category).count()
    }

    /// Pack every particle into GPU instance data
    pub fn pack_instances(&self) -> Vec<ParticleInstance> {
        self.iter().map(|p| ParticleInstance::from_particle(&p)).collect()
    }
}

/// GPU instance data: three vec4 slots per particle.
/// 48 bytes, 16-byte aligned (3 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xyz = position, w = size
    pub pos_size: [f32; 4],
    /// rgb = color, w = category
    pub color_category: [f32; 4],
    /// x = random, y = phase, z = speed, w = reveal key
    pub anim: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            pos_size: [p.position[0], p.position[1], p.position[2], p.size],
            color_category: [p.color[0], p.color[1], p.color[2], p.category.as_f32()],
            anim: [p.random, p.phase, p.speed, p.reveal_key],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32) -> Particle {
        Particle {
            position: [x, 1.0, 2.0],
            color: [0.5, 0.5, 0.5],
            size: 1.0,
            reveal_key: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn push_rejects_non_finite() {
        let mut set = ParticleSet::with_capacity(4);
        assert!(set.push(sample(0.0)));
        assert!(!set.push(sample(f32::NAN)));
        assert!(!set.push(sample(f32::INFINITY)));

        let mut bad_color = sample(1.0);
        bad_color.color[2] = f32::NAN;
        assert!(!set.push(bad_color));

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn yield_ratio_uses_requested() {
        let mut set = ParticleSet::with_capacity(4);
        set.set_requested(4);
        set.push(sample(0.0));
        set.push(sample(1.0));
        set.push(sample(2.0));
        assert!((set.yield_ratio() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn get_reassembles_columns() {
        let mut set = ParticleSet::default();
        let mut p = sample(3.0);
        p.category = ParticleCategory::Ornament;
        p.phase = 1.25;
        set.push(p);
        let back = set.get(0).unwrap();
        assert_eq!(back.position, [3.0, 1.0, 2.0]);
        assert_eq!(back.category, ParticleCategory::Ornament);
        assert_eq!(back.phase, 1.25);
        assert!(set.get(1).is_none());
    }

    #[test]
    fn category_tags_are_stable() {
        assert_eq!(ParticleCategory::Body as u8, 0);
        assert_eq!(ParticleCategory::Ornament as u8, 2);
        assert_eq!(ParticleCategory::Tip.as_f32(), 1.0);
        assert_eq!(ParticleCategory::Ornament.name(), "ornament");
    }

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
    }

    #[test]
    fn pack_instances_matches_len() {
        let mut set = ParticleSet::default();
        for i in 0..5 {
            set.push(sample(i as f32));
        }
        let packed = set.pack_instances();
        assert_eq!(packed.len(), 5);
        assert_eq!(packed[4].pos_size[0], 4.0);
        let bytes: &[u8] = bytemuck::cast_slice(&packed);
        assert_eq!(bytes.len(), 5 * 48);
    }
}

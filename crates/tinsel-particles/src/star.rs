//! Tree-top star: a prismatic mesh and its sparkle cloud

use crate::particle::{Particle, ParticleCategory, ParticleSet};
use crate::rand::RandomSample;
use bytemuck::{Pod, Zeroable};
use std::f32::consts::{FRAC_PI_2, PI};

pub const STAR_POINTS: u32 = 5;
pub const STAR_OUTER_RADIUS: f32 = 0.45;
pub const STAR_INNER_RADIUS: f32 = 0.16;
pub const STAR_DEPTH: f32 = 0.15;
pub const SPARKLE_COUNT: usize = 40;

/// A vertex with position and smooth normal
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A mesh with vertices and indices
#[derive(Debug, Clone)]
pub struct StarMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl StarMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build a double-sided prism star.
///
/// Vertex 0 is the front peak at `+depth`, vertex 1 the back peak at `-depth`,
/// followed by `2 × points` ring vertices alternating outer/inner radius and
/// starting straight up. Each ring edge gets one front and one back triangle.
pub fn create_star_mesh(points: u32, outer: f32, inner: f32, depth: f32) -> StarMesh {
    let ring = points * 2;
    let mut positions = Vec::with_capacity(ring as usize + 2);
    positions.push([0.0, 0.0, depth]);
    positions.push([0.0, 0.0, -depth]);

    for i in 0..ring {
        let angle = i as f32 * PI / points as f32 + FRAC_PI_2;
        let r = if i % 2 == 0 { outer } else { inner };
        positions.push([angle.cos() * r, angle.sin() * r, 0.0]);
    }

    let mut indices = Vec::with_capacity(ring as usize * 6);
    for i in 0..ring {
        let current = 2 + i;
        let next = 2 + (i + 1) % ring;
        indices.extend_from_slice(&[0, current, next]);
        indices.extend_from_slice(&[1, next, current]);
    }

    let normals = compute_vertex_normals(&positions, &indices);
    let vertices = positions
        .into_iter()
        .zip(normals)
        .map(|(position, normal)| MeshVertex { position, normal })
        .collect();

    StarMesh { vertices, indices }
}

/// Area-weighted smooth normals
fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![glam::Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = glam::Vec3::from(positions[a]);
        let pb = glam::Vec3::from(positions[b]);
        let pc = glam::Vec3::from(positions[c]);
        let face = (pb - pa).cross(pc - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    accum
        .into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

/// Sparkle cloud around the star, squashed front-to-back
pub fn generate_star_sparkles<R: RandomSample>(rng: &mut R) -> ParticleSet {
    let mut set = ParticleSet::with_capacity(SPARKLE_COUNT);
    set.set_requested(SPARKLE_COUNT);

    for _ in 0..SPARKLE_COUNT {
        let r = rng.range(0.2, 0.6);
        let theta = rng.angle();
        let phi = rng.range(0.0, PI);
        set.push(Particle {
            position: [
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos() * 0.6,
            ],
            color: [1.0, 1.0, 1.0],
            size: rng.range(2.0, 4.0),
            phase: rng.angle(),
            random: 0.0,
            speed: 0.0,
            category: ParticleCategory::Body,
            reveal_key: 0.0,
        });
    }
    set
}

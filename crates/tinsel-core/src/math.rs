//! Scalar helpers with shader semantics.
//!
//! The vertex programs and samplers are written against these so that the CPU
//! reference path and the GPU path agree on edge behaviour (`mod` of negative
//! numbers, reversed `smoothstep` edges).

/// Linear interpolation between two floats
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep with GLSL semantics.
///
/// `edge0 > edge1` is allowed and yields a falling ramp.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part, always in [0, 1)
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `mod`: result carries the sign of `y`
pub fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_clamps_and_eases() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!(smoothstep(0.0, 1.0, 0.25) < 0.25);
    }

    #[test]
    fn smoothstep_reversed_edges_fall() {
        assert!((smoothstep(1.0, 0.0, 0.0) - 1.0).abs() < 1e-6);
        assert!(smoothstep(1.0, 0.0, 1.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_degenerate_edges_step() {
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.6), 1.0);
    }

    #[test]
    fn fract_and_mod_handle_negatives() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((glsl_mod(-1.0, 50.0) - 49.0).abs() < 1e-4);
        assert!((glsl_mod(7.5, 5.0) - 2.5).abs() < 1e-6);
    }
}

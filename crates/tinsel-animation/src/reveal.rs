//! Threshold visibility against a growth scalar.
//!
//! Every band is hidden while `growth <= key` and non-decreasing in `growth`
//! for a fixed key, so a reveal never flickers back while growing.

use tinsel_core::math::smoothstep;

/// Below this, elements are hidden outright and skip hit-testing
pub const HIDDEN_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealBand {
    /// Fully shown the moment growth passes the key
    Step,
    /// Eases from 0 to 1 while growth runs from `key` to `key + width`
    Ramp { width: f32 },
    /// Growth-line fade: shown at ≥ 0.5 once growth passes the key, full once
    /// growth is `half_width` past it
    Edge { half_width: f32 },
}

impl RevealBand {
    /// Tree and ribbon particle front
    pub const PARTICLE_EDGE: Self = Self::Edge { half_width: 0.05 };
    /// Photo ornaments pop in over a tenth of the height
    pub const PHOTO: Self = Self::Ramp { width: 0.1 };
    /// Star scales in over the last 5% of growth
    pub const STAR: Self = Self::Ramp { width: 0.05 };

    pub fn visibility(&self, key: f32, growth: f32) -> f32 {
        if growth <= key {
            return 0.0;
        }
        match *self {
            Self::Step => 1.0,
            Self::Ramp { width } => smoothstep(key, key + width, growth),
            Self::Edge { half_width } => {
                smoothstep(growth + half_width, growth - half_width, key)
            }
        }
    }

    /// Whether an element at this key counts as present at all
    pub fn is_shown(&self, key: f32, growth: f32) -> bool {
        self.visibility(key, growth) > HIDDEN_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hidden_until_key() {
        for band in [RevealBand::Step, RevealBand::PHOTO, RevealBand::PARTICLE_EDGE] {
            assert_eq!(band.visibility(0.5, 0.3), 0.0);
            assert_eq!(band.visibility(0.5, 0.5), 0.0);
            assert!(!band.is_shown(0.5, 0.5));
        }
    }

    #[test]
    fn full_growth_shows_everything() {
        for band in [RevealBand::Step, RevealBand::PARTICLE_EDGE] {
            assert!((band.visibility(0.0, 1.0) - 1.0).abs() < 1e-6);
            assert!((band.visibility(0.9, 1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn edge_starts_at_half() {
        let v = RevealBand::PARTICLE_EDGE.visibility(0.5, 0.5 + 1e-4);
        assert!(v >= 0.5 && v < 0.52);
    }

    #[test]
    fn star_band() {
        let star = RevealBand::STAR;
        assert_eq!(star.visibility(0.95, 0.9), 0.0);
        assert!((star.visibility(0.95, 0.975) - 0.5).abs() < 1e-4);
        assert!((star.visibility(0.95, 1.0) - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn visibility_non_decreasing_in_growth(
            key in 0.0f32..=1.0,
            g1 in 0.0f32..=1.0,
            g2 in 0.0f32..=1.0,
            kind in 0u8..3,
        ) {
            let band = match kind {
                0 => RevealBand::Step,
                1 => RevealBand::PHOTO,
                _ => RevealBand::PARTICLE_EDGE,
            };
            let (lo, hi) = if g1 <= g2 { (g1, g2) } else { (g2, g1) };
            let a = band.visibility(key, lo);
            let b = band.visibility(key, hi);
            prop_assert!(a <= b + 1e-6, "{:?} key {} : {} -> {}, {} -> {}", band, key, lo, a, hi, b);
            prop_assert!((0.0..=1.0).contains(&a));
        }
    }
}

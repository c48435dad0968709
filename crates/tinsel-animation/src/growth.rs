//! Per-entity growth scalar.
//!
//! One single-pole lerp per frame: `g ← g + (target − g) · rate`. After `n`
//! frames toward a fixed target the residual is `(1 − rate)^n`, so convergence
//! is geometric and the value never overshoots.

use tinsel_core::math::lerp;
use tinsel_runtime::ExperienceSignal;

/// Ribbon and gift group
pub const RATE_FAST: f32 = 0.02;
/// Star and photo ornaments
pub const RATE_SLOW: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthState {
    value: f32,
    rate: f32,
}

impl GrowthState {
    /// Starts hidden at 0
    pub fn new(rate: f32) -> Self {
        Self {
            value: 0.0,
            rate: rate.clamp(0.0, 1.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// One frame toward `target`. Returns the new value.
    pub fn step(&mut self, target: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        self.value = lerp(self.value, target, self.rate).clamp(0.0, 1.0);
        self.value
    }

    /// One frame toward the signal's target
    pub fn follow(&mut self, signal: &ExperienceSignal) -> f32 {
        self.step(signal.growth_target())
    }

    /// Snap back to hidden
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Force a value, for entities that bypass growth
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }

    /// Frames needed for the residual to fall under `epsilon`
    pub fn frames_to_converge(&self, epsilon: f32) -> Option<u32> {
        if self.rate <= 0.0 || epsilon <= 0.0 {
            return None;
        }
        if self.rate >= 1.0 || epsilon >= 1.0 {
            return Some(1);
        }
        let n = epsilon.ln() / (1.0 - self.rate).ln();
        Some(n.ceil() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_zero_and_eases_up() {
        let mut g = GrowthState::new(RATE_FAST);
        assert_eq!(g.value(), 0.0);
        let first = g.step(1.0);
        assert!((first - 0.02).abs() < 1e-6);
    }

    #[test]
    fn residual_is_geometric() {
        let mut g = GrowthState::new(0.1);
        for _ in 0..10 {
            g.step(1.0);
        }
        let expected = 1.0 - 0.9f32.powi(10);
        assert!((g.value() - expected).abs() < 1e-5);
    }

    #[test]
    fn converges_within_predicted_frames() {
        let mut g = GrowthState::new(RATE_SLOW);
        let n = g.frames_to_converge(1e-3).unwrap();
        for _ in 0..n {
            g.step(1.0);
        }
        assert!(1.0 - g.value() < 1e-3 + 1e-5);
    }

    #[test]
    fn reset_and_set_clamp() {
        let mut g = GrowthState::new(0.5);
        g.set(3.0);
        assert_eq!(g.value(), 1.0);
        g.reset();
        assert_eq!(g.value(), 0.0);
    }

    #[test]
    fn follow_uses_signal_target() {
        let mut g = GrowthState::new(0.5);
        g.follow(&ExperienceSignal { active: true, trigger: 1 });
        assert!((g.value() - 0.5).abs() < 1e-6);
        g.follow(&ExperienceSignal { active: false, trigger: 1 });
        assert!((g.value() - 0.25).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn monotone_toward_target(rate in 0.001f32..1.0, start in 0.0f32..=1.0, up in any::<bool>(), frames in 1usize..400) {
            let mut g = GrowthState::new(rate);
            g.set(start);
            let target = if up { 1.0 } else { 0.0 };
            let mut prev = g.value();
            for _ in 0..frames {
                let v = g.step(target);
                if up {
                    prop_assert!(v >= prev);
                } else {
                    prop_assert!(v <= prev);
                }
                prop_assert!((0.0..=1.0).contains(&v));
                prev = v;
            }
        }
    }
}

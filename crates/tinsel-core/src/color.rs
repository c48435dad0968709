//! Linear color with HDR headroom

use crate::error::{Result, TinselError};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// RGBA color. Channels may exceed 1.0 (HDR) for bloom emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) string
    pub fn parse_hex(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TinselError::InvalidColor {
                value: s.to_string(),
                reason: "expected 6 hex digits".into(),
            });
        }
        let hex = u32::from_str_radix(digits, 16).map_err(|e| TinselError::InvalidColor {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_hex(hex))
    }

    /// Parse a hex string, falling back to `fallback` when it is malformed
    pub fn parse_hex_or(s: &str, fallback: Self) -> Self {
        Self::parse_hex(s).unwrap_or(fallback)
    }

    /// `#rrggbb` with channels clamped to [0, 1]
    pub fn to_hex_string(&self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Scale RGB, leaving alpha untouched
    pub fn scaled(&self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s, self.a)
    }

    /// Linear interpolation of RGB toward `other`
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Hue, saturation, lightness, each in [0, 1]
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (min + max) / 2.0;

        if min == max {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (hue / 6.0, saturation, lightness)
    }

    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = crate::math::fract(h);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::rgb(l, l, l);
        }
        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;
        Self::rgb(
            hue_to_rgb(q, p, h + 1.0 / 3.0),
            hue_to_rgb(q, p, h),
            hue_to_rgb(q, p, h - 1.0 / 3.0),
        )
    }

    /// Shift hue/saturation/lightness by the given deltas
    pub fn offset_hsl(&self, dh: f32, ds: f32, dl: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let mut out = Self::from_hsl(h + dh, s + ds, l + dl);
        out.a = self.a;
        out
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = crate::math::fract(t);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Add for Color {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b, self.a)
    }
}

impl Mul<f32> for Color {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        self.scaled(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF8844);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);
    }

    #[test]
    fn parse_hex_accepts_hash_prefix() {
        let c = Color::parse_hex("#024025").unwrap();
        assert_eq!(c, Color::from_hex(0x024025));
        let c = Color::parse_hex("ffd700").unwrap();
        assert_eq!(c, Color::from_hex(0xffd700));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert!(Color::parse_hex("#12").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
        let fallback = Color::parse_hex_or("nope", Color::BLACK);
        assert_eq!(fallback, Color::BLACK);
    }

    #[test]
    fn hex_string_roundtrips() {
        assert_eq!(Color::from_hex(0xd4af37).to_hex_string(), "#d4af37");
    }

    #[test]
    fn hsl_roundtrip() {
        let c = Color::from_hex(0x0d9488);
        let (h, s, l) = c.to_hsl();
        let back = Color::from_hsl(h, s, l);
        assert!((back.r - c.r).abs() < 1e-4);
        assert!((back.g - c.g).abs() < 1e-4);
        assert!((back.b - c.b).abs() < 1e-4);
    }

    #[test]
    fn offset_hsl_lightens() {
        let base = Color::from_hex(0x024025);
        let lighter = base.offset_hsl(0.0, 0.2, 0.15);
        assert!(lighter.to_hsl().2 > base.to_hsl().2);
    }

    #[test]
    fn scale_allows_hdr() {
        let c = Color::WHITE.scaled(2.5);
        assert!((c.r - 2.5).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}

//! Color/shading model for tree particles.
//!
//! Not physically based: each term is a cheap stand-in for something a lit
//! conifer shows. Ambient rises with height, diffuse rises toward the branch
//! surface, the interior of the lower tree sits in shadow, and everything near
//! the apex picks up light from the star.

use tinsel_core::math::lerp;
use tinsel_core::Color;

/// Heights above this are treated as the apex
pub const APEX_HEIGHT: f32 = 0.85;
/// Heights above this pick up additive star glow
pub const GLOW_START: f32 = 0.75;
/// Below this branch-depth ratio the needle counts as interior
pub const INTERIOR_RATIO: f32 = 0.4;
/// Brightness multiplier applied to interior needles
pub const INTERIOR_DARKNESS: f32 = 0.4;

/// Light-bulb palette: red, green, gold, cyan, magenta, orange
pub const BULB_PALETTE: [u32; 6] = [0xff2222, 0x44ff44, 0xffd700, 0x00ffff, 0xff00ff, 0xffaa00];
/// Red berry tint used for a share of the tips
pub const BERRY_RED: u32 = 0xd1001f;

/// Base colors the shading terms modulate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingPalette {
    pub base: Color,
    /// Star color already blended halfway toward white
    pub star_light: Color,
}

impl ShadingPalette {
    pub fn new(tree_color: Color, star_color: Color) -> Self {
        Self {
            base: tree_color,
            star_light: star_color.lerp(Color::WHITE, 0.5),
        }
    }
}

/// Height-driven ambient term
pub fn ambient(h: f32) -> f32 {
    0.2 + h * 0.6
}

/// Surface-proximity diffuse term (`dist` = r / maxR)
pub fn diffuse(dist: f32) -> f32 {
    0.2 + dist * 0.8
}

/// Interior darkening, faded out with height.
///
/// Needles deep in a branch (`r_ratio < 0.4`) start at 0.4 brightness at the
/// base and ease to full by two thirds of the height. The apex is never shadowed.
pub fn shadow(h: f32, r_ratio: f32) -> f32 {
    if h >= APEX_HEIGHT {
        return 1.0;
    }
    let inner = if r_ratio < INTERIOR_RATIO {
        INTERIOR_DARKNESS
    } else {
        1.0
    };
    lerp(inner, 1.0, (h * 1.5).clamp(0.0, 1.0))
}

/// Overall brightness before shadowing; the apex ramps past 1.0 to trigger bloom
pub fn brightness(h: f32, dist: f32) -> f32 {
    if h > APEX_HEIGHT {
        1.5 + (h - APEX_HEIGHT) * 8.0
    } else {
        ambient(h).max(diffuse(dist))
    }
}

/// Additive star-glow weight, `((h - 0.75) / 0.25)^2.5` above the glow line
pub fn star_glow(h: f32) -> f32 {
    if h <= GLOW_START {
        return 0.0;
    }
    let proximity = ((h - GLOW_START) / (1.0 - GLOW_START)).max(0.0);
    proximity.powf(2.5)
}

/// Needle body color
pub fn body_color(palette: &ShadingPalette, h: f32, dist: f32, r_ratio: f32) -> Color {
    let mut color = palette.base * brightness(h, dist) * shadow(h, r_ratio);
    let glow = star_glow(h);
    if glow > 0.0 {
        color = color + palette.star_light * (glow * 0.8);
    }
    color
}

/// New-growth tip color: `berry_draw > 0.7` picks red berry, else a lightened base
pub fn tip_color(palette: &ShadingPalette, berry_draw: f32) -> Color {
    if berry_draw > 0.7 {
        Color::from_hex(BERRY_RED)
    } else {
        palette.base.offset_hsl(0.0, 0.2, 0.15)
    }
}

/// Bulb color from a single uniform draw, six roughly equal bands
pub fn bulb_color(draw: f32) -> Color {
    let hex = if draw > 0.83 {
        BULB_PALETTE[0]
    } else if draw > 0.66 {
        BULB_PALETTE[1]
    } else if draw > 0.50 {
        BULB_PALETTE[2]
    } else if draw > 0.33 {
        BULB_PALETTE[3]
    } else if draw > 0.16 {
        BULB_PALETTE[4]
    } else {
        BULB_PALETTE[5]
    };
    Color::from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ShadingPalette {
        ShadingPalette::new(Color::from_hex(0x024025), Color::from_hex(0xffaa00))
    }

    #[test]
    fn star_light_is_halfway_to_white() {
        let p = palette();
        let star = Color::from_hex(0xffaa00);
        assert!((p.star_light.b - (star.b + 1.0) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn brightness_takes_max_of_terms() {
        assert!((brightness(0.5, 0.1) - ambient(0.5)).abs() < 1e-6);
        assert!((brightness(0.1, 0.9) - diffuse(0.9)).abs() < 1e-6);
    }

    #[test]
    fn apex_ramps_past_one() {
        assert!(brightness(0.9, 0.0) > 1.5);
        assert!(brightness(1.0, 0.0) > brightness(0.9, 0.0));
    }

    #[test]
    fn interior_shadow_fades_with_height() {
        assert!((shadow(0.0, 0.1) - INTERIOR_DARKNESS).abs() < 1e-6);
        assert!(shadow(0.3, 0.1) > shadow(0.1, 0.1));
        assert!((shadow(0.7, 0.1) - 1.0).abs() < 1e-6);
        assert_eq!(shadow(0.2, 0.9), 1.0);
        assert_eq!(shadow(0.9, 0.1), 1.0);
    }

    #[test]
    fn star_glow_only_near_top() {
        assert_eq!(star_glow(0.5), 0.0);
        assert_eq!(star_glow(0.75), 0.0);
        assert!((star_glow(1.0) - 1.0).abs() < 1e-6);
        assert!(star_glow(0.9) < star_glow(0.95));
    }

    #[test]
    fn body_color_is_non_negative() {
        let p = palette();
        for i in 0..=20 {
            let h = i as f32 / 20.0;
            let c = body_color(&p, h, 0.5, 0.2);
            assert!(c.r >= 0.0 && c.g >= 0.0 && c.b >= 0.0);
            assert!(c.is_finite());
        }
    }

    #[test]
    fn bulb_palette_covers_all_bands() {
        let draws = [0.9, 0.7, 0.55, 0.4, 0.2, 0.05];
        for (i, d) in draws.iter().enumerate() {
            assert_eq!(bulb_color(*d), Color::from_hex(BULB_PALETTE[i]));
        }
    }

    #[test]
    fn tip_color_branches_on_berry_draw() {
        let p = palette();
        assert_eq!(tip_color(&p, 0.95), Color::from_hex(BERRY_RED));
        assert_ne!(tip_color(&p, 0.1), Color::from_hex(BERRY_RED));
    }
}

//! Procedural RGBA textures: gift-ribbon stripes and the soft snow dot

use image::{Rgba, RgbaImage};
use tinsel_core::math::{glsl_mod, lerp};

pub const STRIPE_SIZE: u32 = 512;
pub const STRIPE_PERIOD: f32 = 64.0;
pub const STRIPE_WIDTH: f32 = 32.0;
const STRIPE_SHADE: u8 = 0xde;
/// Grain amplitude in 8-bit steps, either side of zero
const GRAIN: f32 = 4.0;

pub const DOT_SIZE: u32 = 32;
const DOT_RADIUS: f32 = 15.0;
/// (offset, alpha) gradient stops from center to edge
const DOT_STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.3, 0.8), (0.5, 0.3), (1.0, 0.0)];

/// Integer hash noise in [0, 1]
fn hash(x: u32, y: u32, seed: u32) -> f32 {
    let n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1274126177));
    let n = (n ^ (n >> 13)).wrapping_mul(1103515245);
    let n = n ^ (n >> 16);
    (n & 0x7FFFFFFF) as f32 / 0x7FFFFFFF as f32
}

/// Whether pixel (x, y) falls on a 45° stripe
pub fn on_stripe(x: u32, y: u32) -> bool {
    glsl_mod(x as f32 - y as f32, STRIPE_PERIOD) < STRIPE_WIDTH
}

/// White fabric with light-grey diagonal stripes and per-pixel grain
pub fn ribbon_stripe_texture(seed: u32) -> RgbaImage {
    let mut img = RgbaImage::new(STRIPE_SIZE, STRIPE_SIZE);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let base = if on_stripe(x, y) { STRIPE_SHADE } else { 0xff };
        let noise = (hash(x, y, seed) - 0.5) * 2.0 * GRAIN;
        let v = (base as f32 + noise).round().clamp(0.0, 255.0) as u8;
        *px = Rgba([v, v, v, 255]);
    }
    img
}

/// Alpha of the radial gradient at normalized distance `d`
fn dot_alpha(d: f32) -> f32 {
    if d >= 1.0 {
        return 0.0;
    }
    for pair in DOT_STOPS.windows(2) {
        let (o0, a0) = pair[0];
        let (o1, a1) = pair[1];
        if d <= o1 {
            return lerp(a0, a1, (d - o0) / (o1 - o0));
        }
    }
    0.0
}

/// White dot with a soft radial alpha falloff, used as the snowflake sprite
pub fn soft_dot_texture() -> RgbaImage {
    let center = DOT_SIZE as f32 / 2.0;
    RgbaImage::from_fn(DOT_SIZE, DOT_SIZE, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let d = (dx * dx + dy * dy).sqrt() / DOT_RADIUS;
        let a = (dot_alpha(d) * 255.0).round() as u8;
        Rgba([255, 255, 255, a])
    })
}

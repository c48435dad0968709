//! Gift box layout around the tree base

use crate::rand::RandomSample;
use std::f32::consts::TAU;
use tinsel_core::Color;

pub const GIFT_COUNT: usize = 30;
/// Wrap palette: red, teal, gold, silver, dark blue, plum, rose, champagne
pub const WRAP_PALETTE: [u32; 8] = [
    0xd1001f, 0x0d9488, 0xd4af37, 0xe2e8f0, 0x1e293b, 0x701a75, 0x9f1239, 0xfff1f2,
];
/// The gift pile's origin above the tree group
pub const GIFT_GROUP_Y: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Tall,
    Flat,
    Cube,
}

/// Surface finish of the wrapping paper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapFinish {
    pub roughness: f32,
    pub metalness: f32,
}

impl WrapFinish {
    pub const FOIL: Self = Self {
        roughness: 0.2,
        metalness: 0.6,
    };
    pub const PAPER: Self = Self {
        roughness: 0.8,
        metalness: 0.1,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct GiftBox {
    /// Box center, resting on the ground plane of the gift group
    pub position: [f32; 3],
    /// Euler XYZ
    pub rotation: [f32; 3],
    /// Width, height, depth
    pub size: [f32; 3],
    pub style: BoxStyle,
    pub wrap: Color,
    pub ribbon: Color,
    pub finish: WrapFinish,
}

impl GiftBox {
    pub fn is_foil(&self) -> bool {
        self.finish == WrapFinish::FOIL
    }
}

fn box_size<R: RandomSample>(style: BoxStyle, rng: &mut R) -> [f32; 3] {
    match style {
        BoxStyle::Tall => {
            let w = rng.range(0.6, 1.0);
            let d = rng.range(0.6, 1.0);
            [w, rng.range(0.8, 1.6), d]
        }
        BoxStyle::Flat => {
            let w = rng.range(1.0, 1.8);
            let d = rng.range(0.8, 1.4);
            [w, rng.range(0.3, 0.6), d]
        }
        BoxStyle::Cube => {
            let s = rng.range(0.7, 1.2);
            [s, s, s]
        }
    }
}

/// Scatter `count` boxes in a ring just outside the branches
pub fn generate_gifts<R: RandomSample>(count: usize, rng: &mut R) -> Vec<GiftBox> {
    let mut gifts = Vec::with_capacity(count);

    for i in 0..count {
        let angle = i as f32 / count as f32 * TAU + rng.range(0.0, 0.8);
        let radius = rng.range(6.0, 9.5);

        let style_draw = rng.next_f32();
        let style = if style_draw > 0.66 {
            BoxStyle::Tall
        } else if style_draw > 0.33 {
            BoxStyle::Flat
        } else {
            BoxStyle::Cube
        };
        let size = box_size(style, rng);

        let wrap_hex = WRAP_PALETTE[rng.index(WRAP_PALETTE.len())];
        let ribbon_hex = WRAP_PALETTE[rng.index(WRAP_PALETTE.len())];
        let ribbon = if ribbon_hex == wrap_hex {
            Color::WHITE
        } else {
            Color::from_hex(ribbon_hex)
        };

        let rotation = [rng.centered(0.05), rng.angle(), rng.centered(0.05)];
        let finish = if rng.next_f32() > 0.3 {
            WrapFinish::FOIL
        } else {
            WrapFinish::PAPER
        };

        gifts.push(GiftBox {
            position: [angle.cos() * radius, size[1] / 2.0, angle.sin() * radius],
            rotation,
            size,
            style,
            wrap: Color::from_hex(wrap_hex),
            ribbon,
            finish,
        });
    }
    gifts
}

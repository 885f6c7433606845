use rand::Rng;

use super::{Frame, Particle, Sprite, pick};
use crate::anim::{CubicBezier, Easing, keyframes, tween};

pub const CONFETTI_COLORS: [&str; 9] = [
    "#E6E6FA", // lavender
    "#FFD1DC", // rose gold
    "#F0E68C", // champagne
    "#87CEEB", // sky blue
    "#FFDAB9", // peach
    "#FFD700", // gold
    "#C0C0C0", // silver
    "#FF69B4", // pink
    "#FFFFFF", // white
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfettiShape {
    Rect,
    Circle,
    Star,
    Heart,
}

pub const CONFETTI_SHAPES: [ConfettiShape; 4] =
    [ConfettiShape::Rect, ConfettiShape::Circle, ConfettiShape::Star, ConfettiShape::Heart];

pub const MIN_BURST: usize = 35;
pub const MAX_BURST: usize = 59;

const FALL: Easing = Easing::Bezier(CubicBezier::new(0.25, 0.46, 0.45, 0.94));
const TIMES: [f64; 5] = [0.0, 0.3, 0.6, 0.85, 1.0];
const OPACITY: [f64; 5] = [1.0, 1.0, 1.0, 0.7, 0.0];
const SCALE: [f64; 5] = [1.0, 1.0, 1.0, 0.8, 0.5];

/// A piece of confetti falling from just above the viewport to below it.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
    pub shape: ConfettiShape,
    pub rotation: f64,
    pub size_px: f64,
    pub x_drift: f64,
    /// Total spin over the fall, ±720°.
    pub spin: f64,
    pub fall_s: f64,
}

impl Particle for ConfettiPiece {
    const NAME: &'static str = "confetti";
    const SPAWN_PERIOD_MS: f64 = 2000.0;
    const MAX_LIFETIME_MS: f64 = 7_000.0;

    fn burst_size<R: Rng + ?Sized>(rng: &mut R) -> usize {
        rng.gen_range(MIN_BURST..=MAX_BURST)
    }

    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ConfettiPiece {
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(-15.0..5.0),
            color: pick(rng, &CONFETTI_COLORS),
            shape: pick(rng, &CONFETTI_SHAPES),
            rotation: rng.gen_range(0.0..360.0),
            size_px: rng.gen_range(5.0..15.0),
            x_drift: rng.gen_range(-20.0..20.0),
            spin: if rng.gen_bool(0.5) { 720.0 } else { -720.0 },
            fall_s: rng.gen_range(5.0..7.0),
        }
    }

    fn lifetime_ms(&self) -> f64 {
        7000.0
    }

    fn frame(&self, elapsed_ms: f64) -> Frame {
        let p = (elapsed_ms / (self.fall_s * 1000.0)).clamp(0.0, 1.0);
        Frame {
            x_vw: tween(self.x, self.x + self.x_drift, FALL, p),
            y_vh: tween(self.y, 110.0, FALL, p),
            dy_px: 0.0,
            rotation_deg: tween(self.rotation, self.rotation + self.spin, FALL, p),
            scale: keyframes(&SCALE, Some(&TIMES), FALL, p),
            opacity: keyframes(&OPACITY, Some(&TIMES), FALL, p),
        }
    }

    fn sprite(&self) -> Sprite {
        match self.shape {
            ConfettiShape::Circle => Sprite::Circle { diameter_px: self.size_px, color: self.color },
            ConfettiShape::Star => Sprite::TintedGlyph { text: "⭐", size_px: self.size_px, color: self.color },
            ConfettiShape::Heart => Sprite::TintedGlyph { text: "💖", size_px: self.size_px, color: self.color },
            ConfettiShape::Rect => Sprite::Rect {
                width_px: self.size_px,
                height_px: self.size_px * 1.6,
                color: self.color,
            },
        }
    }
}

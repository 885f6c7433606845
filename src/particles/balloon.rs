use rand::Rng;

use super::{Frame, Particle, Sprite, pick};
use crate::anim::{Easing, keyframes, oscillate};

pub const BALLOON_GLYPHS: [&str; 1] = ["🎈"];

const FLIGHT_MS: f64 = 15_000.0;
const TIMES: [f64; 6] = [0.0, 0.1, 0.4, 0.7, 0.9, 1.0];
const OPACITY: [f64; 6] = [0.0, 1.0, 1.0, 1.0, 0.8, 0.0];
const SCALE: [f64; 6] = [0.5, 1.0, 1.0, 1.0, 0.9, 0.7];

/// A balloon drifting up slowly, swaying sideways and bobbing.
#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    pub x: f64,
    pub glyph: &'static str,
    pub sway: f64,
    pub size: f64,
    pub bob_s: f64,
}

impl Particle for Balloon {
    const NAME: &'static str = "balloons";
    const SPAWN_PERIOD_MS: f64 = 2000.0;
    const MAX_LIFETIME_MS: f64 = 18_000.0;

    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Balloon {
            x: rng.gen_range(7.5..92.5),
            glyph: pick(rng, &BALLOON_GLYPHS),
            sway: rng.gen_range(-35.0..35.0),
            size: rng.gen_range(0.9..1.3),
            bob_s: rng.gen_range(2.0..3.0),
        }
    }

    fn lifetime_ms(&self) -> f64 {
        18_000.0
    }

    fn frame(&self, elapsed_ms: f64) -> Frame {
        let p = (elapsed_ms / FLIGHT_MS).clamp(0.0, 1.0);
        let s = self.sway;
        let path = [self.x, self.x + s * 0.2, self.x + s * 0.6, self.x + s, self.x + s * 0.7];
        let bob_ms = self.bob_s * 1000.0;
        Frame {
            x_vw: keyframes(&path, None, Easing::EaseInOut, p),
            y_vh: keyframes(&[110.0, -25.0], None, Easing::Linear, p),
            dy_px: oscillate(&[-5.0, 5.0, -5.0], bob_ms, elapsed_ms, Easing::EaseInOut),
            rotation_deg: oscillate(&[-3.0, 3.0, -3.0], bob_ms, elapsed_ms, Easing::EaseInOut),
            scale: keyframes(&SCALE, Some(&TIMES), Easing::Linear, p),
            opacity: keyframes(&OPACITY, Some(&TIMES), Easing::Linear, p),
        }
    }

    fn sprite(&self) -> Sprite {
        Sprite::Glyph { text: self.glyph, size_px: self.size * 64.0 }
    }
}

use rand::Rng;

use super::{Frame, Particle, Sprite, pick};
use crate::anim::{CubicBezier, Easing, keyframes};

pub const STAR_GLYPHS: [&str; 5] = ["⭐", "🌟", "✨", "💫", "⚡"];

const POP: Easing = Easing::Bezier(CubicBezier::new(0.34, 1.56, 0.64, 1.0));
const TIMES: [f64; 5] = [0.0, 0.2, 0.5, 0.8, 1.0];
const OPACITY: [f64; 5] = [0.0, 1.0, 1.0, 0.8, 0.0];
const SCALE: [f64; 5] = [0.0, 1.2, 1.0, 1.1, 0.5];
const ROTATE: [f64; 3] = [0.0, 180.0, 360.0];

/// A twinkling glyph that pops in place, spins once and fades.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub glyph: &'static str,
    pub size_rem: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl Particle for Star {
    const NAME: &'static str = "stars";
    const SPAWN_PERIOD_MS: f64 = 600.0;
    const MAX_LIFETIME_MS: f64 = 3_200.0;

    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Star {
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..100.0),
            glyph: pick(rng, &STAR_GLYPHS),
            size_rem: rng.gen_range(0.8..2.3),
            duration_s: rng.gen_range(1.5..3.0),
            delay_s: rng.gen_range(0.0..0.2),
        }
    }

    fn lifetime_ms(&self) -> f64 {
        (self.duration_s + self.delay_s) * 1000.0
    }

    fn frame(&self, elapsed_ms: f64) -> Frame {
        let delay_ms = self.delay_s * 1000.0;
        if elapsed_ms < delay_ms {
            return Frame { x_vw: self.x, y_vh: self.y, rotation_deg: -180.0, ..Frame::hidden() };
        }
        let p = (elapsed_ms - delay_ms) / (self.duration_s * 1000.0);
        Frame {
            x_vw: self.x,
            y_vh: self.y,
            dy_px: 0.0,
            rotation_deg: keyframes(&ROTATE, None, POP, p),
            scale: keyframes(&SCALE, Some(&TIMES), POP, p),
            opacity: keyframes(&OPACITY, Some(&TIMES), POP, p).clamp(0.0, 1.0),
        }
    }

    fn sprite(&self) -> Sprite {
        Sprite::Glyph { text: self.glyph, size_px: self.size_rem * 16.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn generated_values_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let s = Star::generate(&mut rng);
            assert!((0.0..100.0).contains(&s.x) && (0.0..100.0).contains(&s.y));
            assert!(STAR_GLYPHS.contains(&s.glyph));
            assert!((0.8..2.3).contains(&s.size_rem));
            assert!((1.5..3.2).contains(&(s.duration_s + s.delay_s)));
            assert_eq!(Star::burst_size(&mut rng), 1);
        }
    }

    #[test]
    fn hidden_during_delay_and_gone_at_end() {
        let s = Star { x: 10.0, y: 20.0, glyph: "⭐", size_rem: 1.0, duration_s: 2.0, delay_s: 0.1 };
        assert_eq!(s.frame(50.0).opacity, 0.0);
        assert_eq!(s.frame(50.0).rotation_deg, -180.0);
        let end = s.frame(s.lifetime_ms());
        assert!(end.opacity.abs() < 1e-9);
        assert!((end.rotation_deg - 360.0).abs() < 1e-9);
        assert!((end.scale - 0.5).abs() < 1e-9);
    }
}

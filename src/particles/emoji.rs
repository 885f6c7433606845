use rand::Rng;

use super::{Frame, Particle, Sprite, pick};
use crate::anim::{CubicBezier, Easing, keyframes, oscillate};

pub const PARTY_EMOJIS: [&str; 8] = ["🎂", "🎁", "💖", "🎊", "🎉", "🥳", "🎈", "🌟"];

const FLIGHT_MS: f64 = 10_000.0;
const WOBBLE_PERIOD_MS: f64 = 2_000.0;
const RISE: Easing = Easing::Bezier(CubicBezier::new(0.22, 1.0, 0.36, 1.0));
const OPACITY_TIMES: [f64; 5] = [0.0, 0.1, 0.5, 0.8, 1.0];
const OPACITY: [f64; 5] = [0.0, 1.0, 1.0, 0.8, 0.0];

/// A party emoji rising from below the viewport while drifting and wobbling.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingEmoji {
    pub x: f64,
    pub glyph: &'static str,
    pub drift: f64,
    pub rotation: f64,
    pub scale: f64,
    pub wobble: f64,
}

impl Particle for FloatingEmoji {
    const NAME: &'static str = "emojis";
    const SPAWN_PERIOD_MS: f64 = 1200.0;
    const MAX_LIFETIME_MS: f64 = 12_000.0;

    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        FloatingEmoji {
            x: rng.gen_range(5.0..95.0),
            glyph: pick(rng, &PARTY_EMOJIS),
            drift: rng.gen_range(-50.0..50.0),
            rotation: rng.gen_range(-360.0..360.0),
            scale: rng.gen_range(0.7..1.3),
            wobble: rng.gen_range(15.0..45.0),
        }
    }

    fn lifetime_ms(&self) -> f64 {
        12_000.0
    }

    fn frame(&self, elapsed_ms: f64) -> Frame {
        let p = (elapsed_ms / FLIGHT_MS).clamp(0.0, 1.0);
        let path = [self.x, self.x + self.drift * 0.3, self.x + self.drift * 0.7, self.x + self.drift];
        let spin = [0.0, self.rotation * 0.5, self.rotation];
        let wobble = [-self.wobble, self.wobble, -self.wobble];
        Frame {
            x_vw: keyframes(&path, None, Easing::EaseInOut, p),
            y_vh: keyframes(&[110.0, -20.0], None, RISE, p),
            dy_px: 0.0,
            rotation_deg: keyframes(&spin, None, RISE, p)
                + oscillate(&wobble, WOBBLE_PERIOD_MS, elapsed_ms, Easing::EaseInOut),
            scale: self.scale,
            opacity: keyframes(&OPACITY, Some(&OPACITY_TIMES), RISE, p).clamp(0.0, 1.0),
        }
    }

    fn sprite(&self) -> Sprite {
        Sprite::Glyph { text: self.glyph, size_px: 34.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn generated_values_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(31);
        for _ in 0..500 {
            let e = FloatingEmoji::generate(&mut rng);
            assert!((5.0..95.0).contains(&e.x));
            assert!(PARTY_EMOJIS.contains(&e.glyph));
            assert!((-50.0..50.0).contains(&e.drift));
            assert!((0.7..1.3).contains(&e.scale));
            assert!((15.0..45.0).contains(&e.wobble));
        }
    }

    #[test]
    fn rises_through_the_viewport() {
        let e = FloatingEmoji { x: 50.0, glyph: "🎂", drift: 10.0, rotation: 90.0, scale: 1.0, wobble: 20.0 };
        let start = e.frame(0.0);
        assert_eq!(start.y_vh, 110.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.rotation_deg, -20.0);
        let end = e.frame(FLIGHT_MS);
        assert!((end.y_vh + 20.0).abs() < 1e-9);
        assert!((end.x_vw - 60.0).abs() < 1e-9);
        assert!(e.frame(3_000.0).opacity > 0.9);
    }
}

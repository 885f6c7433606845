//! Decorative particle effects (stars, confetti, floating emojis, balloons).
//!
//! All four share one lifecycle, implemented once by [`ParticleEffect`]:
//! - inactive: no particles, no timers
//! - activation starts a repeating spawn timer; every tick appends a burst of
//!   freshly randomised particles, each with its own one-shot removal timer
//! - deactivation cancels every timer and clears the list at once
//!
//! Removal is wall-clock driven; it never waits for a particle's animation.
//! The variants only describe *what* a particle looks like ([`Particle`]).

use rand::Rng;

use crate::clock::{Epoch, Scheduler};

pub mod balloon;
pub mod confetti;
pub mod emoji;
pub mod star;

pub use balloon::Balloon;
pub use confetti::ConfettiPiece;
pub use emoji::FloatingEmoji;
pub use star::Star;

/// Render state of a particle at one instant. Positions are viewport relative
/// (0–100 for each axis), rotation in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x_vw: f64,
    pub y_vh: f64,
    /// Extra vertical offset in CSS pixels (bobbing).
    pub dy_px: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Frame {
    pub fn hidden() -> Self {
        Self { x_vw: 0.0, y_vh: 0.0, dy_px: 0.0, rotation_deg: 0.0, scale: 0.0, opacity: 0.0 }
    }
}

/// What the renderer draws at the frame's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    Glyph { text: &'static str, size_px: f64 },
    /// Tinted glyph (confetti stars / hearts).
    TintedGlyph { text: &'static str, size_px: f64, color: &'static str },
    Rect { width_px: f64, height_px: f64, color: &'static str },
    Circle { diameter_px: f64, color: &'static str },
}

pub trait Particle: Sized {
    /// Layer name, logged when the celebration starts.
    const NAME: &'static str;
    const SPAWN_PERIOD_MS: f64;
    /// Upper bound of `lifetime_ms` over every particle `generate` can return.
    const MAX_LIFETIME_MS: f64;

    /// Number of particles appended on one spawn tick.
    fn burst_size<R: Rng + ?Sized>(_rng: &mut R) -> usize {
        1
    }

    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Time from insertion to removal.
    fn lifetime_ms(&self) -> f64;

    fn frame(&self, elapsed_ms: f64) -> Frame;

    fn sprite(&self) -> Sprite;
}

/// Uniform pick from a non-empty static table.
pub(crate) fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[T]) -> T {
    table[rng.gen_range(0..table.len())]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u64);

#[derive(Clone, Debug)]
pub struct Live<P> {
    pub id: ParticleId,
    pub born_ms: f64,
    pub particle: P,
}

impl<P: Particle> Live<P> {
    pub fn frame(&self, now_ms: f64) -> Frame {
        self.particle.frame(now_ms - self.born_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum EffectEvent {
    Spawn,
    Expire(ParticleId),
}

pub struct ParticleEffect<P> {
    active: bool,
    epoch: Epoch,
    next_id: u64,
    live: Vec<Live<P>>,
    timers: Scheduler<EffectEvent>,
}

impl<P: Particle> Default for ParticleEffect<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Particle> ParticleEffect<P> {
    pub fn new() -> Self {
        Self {
            active: false,
            epoch: Epoch::default(),
            next_id: 0,
            live: Vec::new(),
            timers: Scheduler::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn particles(&self) -> &[Live<P>] {
        &self.live
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Follows the activation flag. Repeating the current value is a no-op.
    pub fn set_active(&mut self, active: bool, now_ms: f64) {
        if active == self.active {
            return;
        }
        // Both directions drop whatever the previous activation left behind.
        self.timers.clear_all();
        self.live.clear();
        self.active = active;
        if active {
            self.epoch = self.epoch.next();
            self.timers.settle(now_ms);
            self.timers.set_interval(P::SPAWN_PERIOD_MS, self.epoch, EffectEvent::Spawn);
        }
    }

    /// Processes every timer due up to `now_ms`.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            if !self.active || fired.epoch != self.epoch {
                continue;
            }
            match fired.event {
                // Born and gone before `now_ms` (a long hidden-tab gap): nothing to draw.
                EffectEvent::Spawn if fired.due_ms + P::MAX_LIFETIME_MS <= now_ms => {}
                EffectEvent::Spawn => self.spawn(fired.due_ms, rng),
                EffectEvent::Expire(id) => self.live.retain(|l| l.id != id),
            }
        }
        self.timers.settle(now_ms);
    }

    fn spawn<R: Rng + ?Sized>(&mut self, at_ms: f64, rng: &mut R) {
        let count = P::burst_size(rng);
        for _ in 0..count {
            let particle = P::generate(rng);
            let id = ParticleId(self.next_id);
            self.next_id += 1;
            self.timers.set_timeout(particle.lifetime_ms(), self.epoch, EffectEvent::Expire(id));
            self.live.push(Live { id, born_ms: at_ms, particle });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    struct Dot;

    impl Particle for Dot {
        const NAME: &'static str = "dot";
        const SPAWN_PERIOD_MS: f64 = 100.0;
        const MAX_LIFETIME_MS: f64 = 250.0;

        fn burst_size<R: Rng + ?Sized>(_rng: &mut R) -> usize {
            2
        }
        fn generate<R: Rng + ?Sized>(_rng: &mut R) -> Self {
            Dot
        }
        fn lifetime_ms(&self) -> f64 {
            250.0
        }
        fn frame(&self, _elapsed_ms: f64) -> Frame {
            Frame::hidden()
        }
        fn sprite(&self) -> Sprite {
            Sprite::Circle { diameter_px: 1.0, color: "#fff" }
        }
    }

    #[test]
    fn inactive_effect_is_empty_and_idle() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.tick(10_000.0, &mut rng);
        assert!(fx.particles().is_empty());
        assert_eq!(fx.pending_timers(), 0);
    }

    #[test]
    fn spawns_on_period_and_expires_after_lifetime() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.set_active(true, 1_000.0);
        fx.tick(1_099.0, &mut rng);
        assert_eq!(fx.particles().len(), 0);
        fx.tick(1_100.0, &mut rng);
        assert_eq!(fx.particles().len(), 2);
        assert!(fx.particles().iter().all(|l| l.born_ms == 1_100.0));
        // ticks at 1200 and 1300 add two each; first burst leaves at 1350
        fx.tick(1_349.0, &mut rng);
        assert_eq!(fx.particles().len(), 6);
        fx.tick(1_350.0, &mut rng);
        assert_eq!(fx.particles().len(), 4);
    }

    #[test]
    fn late_frame_still_removes_at_exact_lifetime() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.set_active(true, 0.0);
        // one long frame: spawns at 100..=1000, removals at spawn + 250
        fx.tick(1_000.0, &mut rng);
        let mut born: Vec<f64> = fx.particles().iter().map(|l| l.born_ms).collect();
        born.dedup();
        assert_eq!(born, vec![800.0, 900.0, 1_000.0]);
    }

    #[test]
    fn deactivate_clears_everything() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.set_active(true, 0.0);
        fx.tick(500.0, &mut rng);
        assert!(!fx.particles().is_empty());
        fx.set_active(false, 500.0);
        assert!(fx.particles().is_empty());
        assert_eq!(fx.pending_timers(), 0);
    }

    #[test]
    fn reactivation_starts_a_fresh_epoch() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.set_active(true, 0.0);
        let first = fx.epoch();
        fx.tick(150.0, &mut rng);
        fx.set_active(false, 150.0);
        fx.set_active(true, 160.0);
        assert_ne!(fx.epoch(), first);
        // nothing from the first activation survives or fires
        fx.tick(259.0, &mut rng);
        assert!(fx.particles().is_empty());
        fx.tick(260.0, &mut rng);
        assert_eq!(fx.particles().len(), 2);
        assert!(fx.particles().iter().all(|l| l.born_ms == 260.0));
    }

    #[test]
    fn repeated_activation_is_noop() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.set_active(true, 0.0);
        fx.tick(100.0, &mut rng);
        fx.set_active(true, 120.0);
        assert_eq!(fx.particles().len(), 2);
        assert_eq!(fx.pending_timers(), 3);
    }

    #[test]
    fn long_gap_skips_spawns_that_already_expired() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut fx: ParticleEffect<Dot> = ParticleEffect::new();
        fx.set_active(true, 0.0);
        fx.tick(16.0, &mut rng);
        fx.tick(3_600_000.0, &mut rng);
        // only the spawns at now-200, now-100 and now are still alive
        let mut born: Vec<f64> = fx.particles().iter().map(|l| l.born_ms).collect();
        born.dedup();
        assert_eq!(born, vec![3_599_800.0, 3_599_900.0, 3_600_000.0]);
        assert!(fx.particles().iter().all(|l| l.born_ms + l.particle.lifetime_ms() > 3_600_000.0));
        // the skipped ticks never generated anything
        assert_eq!(fx.next_id, 6);
        assert_eq!(fx.pending_timers(), 1 + fx.particles().len());
    }
}

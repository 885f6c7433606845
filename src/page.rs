//! Page orchestration: one activation flag feeding every effect.
//!
//! The page starts idle behind the start overlay. `start` flips the flag once
//! (there is no way back), unmutes and plays the music, activates every effect
//! and schedules the message panel. `tick` is called once per animation frame.

use rand::Rng;

use crate::clock::{Epoch, Scheduler};
use crate::config::Config;
use crate::media::MediaGrid;
use crate::particles::{Balloon, ConfettiPiece, FloatingEmoji, ParticleEffect, Star};

/// Background music. Playback is best effort: implementations swallow (and may
/// log) autoplay rejections instead of reporting them.
pub trait AudioSink {
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
    fn play(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PageEvent {
    ShowMessage,
}

pub struct Page<A, R> {
    config: Config,
    audio: A,
    rng: R,
    started: bool,
    muted: bool,
    message_visible: bool,
    timers: Scheduler<PageEvent>,
    pub stars: ParticleEffect<Star>,
    pub confetti: ParticleEffect<ConfettiPiece>,
    pub emojis: ParticleEffect<FloatingEmoji>,
    pub balloons: ParticleEffect<Balloon>,
    pub media: MediaGrid,
}

impl<A, R> Page<A, R> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn message_visible(&self) -> bool {
        self.started && self.message_visible
    }

    /// Total live particles over all four layers.
    pub fn particle_count(&self) -> usize {
        self.stars.particles().len()
            + self.confetti.particles().len()
            + self.emojis.particles().len()
            + self.balloons.particles().len()
    }
}

impl<A: AudioSink, R: Rng> Page<A, R> {
    pub fn new(config: Config, mut audio: A, rng: R) -> Self {
        audio.set_muted(true);
        let media = MediaGrid::new(config.media.clone(), config.breakpoints.clone());
        Self {
            config,
            audio,
            rng,
            started: false,
            muted: true,
            message_visible: false,
            timers: Scheduler::default(),
            stars: ParticleEffect::new(),
            confetti: ParticleEffect::new(),
            emojis: ParticleEffect::new(),
            balloons: ParticleEffect::new(),
            media,
        }
    }

    /// The one-way "start celebrating" gesture. Returns false when already started.
    pub fn start(&mut self, now_ms: f64, viewport_width: f64) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        self.audio.set_muted(false);
        self.muted = self.audio.is_muted();
        self.audio.play();

        self.timers.settle(now_ms);
        self.timers.set_timeout(self.config.message_delay_ms, Epoch::default(), PageEvent::ShowMessage);

        self.stars.set_active(true, now_ms);
        self.confetti.set_active(true, now_ms);
        self.emojis.set_active(true, now_ms);
        self.balloons.set_active(true, now_ms);
        self.media.set_active(true, now_ms, viewport_width, &mut self.rng);
        true
    }

    /// Flips the audio's muted attribute and mirrors it. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        self.muted = self.audio.is_muted();
        self.muted
    }

    pub fn tick(&mut self, now_ms: f64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            match fired.event {
                PageEvent::ShowMessage => self.message_visible = true,
            }
        }
        self.timers.settle(now_ms);

        self.stars.tick(now_ms, &mut self.rng);
        self.confetti.tick(now_ms, &mut self.rng);
        self.emojis.tick(now_ms, &mut self.rng);
        self.balloons.tick(now_ms, &mut self.rng);
        self.media.tick(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[derive(Default)]
    struct FakeAudio {
        muted: bool,
        plays: usize,
    }

    impl AudioSink for FakeAudio {
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
        fn play(&mut self) {
            self.plays += 1;
        }
    }

    fn page() -> Page<FakeAudio, SmallRng> {
        Page::new(Config::default(), FakeAudio::default(), SmallRng::seed_from_u64(71))
    }

    #[test]
    fn idle_page_is_quiet() {
        let mut p = page();
        p.tick(60_000.0);
        assert!(!p.is_started());
        assert!(p.is_muted());
        assert!(p.audio().muted);
        assert_eq!(p.particle_count(), 0);
        assert!(p.media.is_empty());
        assert!(!p.message_visible());
    }

    #[test]
    fn start_unmutes_plays_and_is_one_way() {
        let mut p = page();
        assert!(p.start(0.0, 1024.0));
        assert!(!p.is_muted());
        assert!(!p.audio().muted);
        assert_eq!(p.audio().plays, 1);
        assert!(!p.start(10.0, 1024.0));
        assert_eq!(p.audio().plays, 1);
        assert!(p.stars.is_active() && p.confetti.is_active());
    }

    #[test]
    fn message_appears_after_delay() {
        let mut p = page();
        p.start(500.0, 1024.0);
        p.tick(2_499.0);
        assert!(!p.message_visible());
        p.tick(2_500.0);
        assert!(p.message_visible());
    }

    #[test]
    fn mute_toggle_mirrors_audio() {
        let mut p = page();
        p.start(0.0, 1024.0);
        assert!(p.toggle_mute());
        assert!(p.audio().muted && p.is_muted());
        assert!(!p.toggle_mute());
        assert!(!p.audio().muted && !p.is_muted());
    }

    #[test]
    fn effects_populate_after_start() {
        let mut p = page();
        p.start(0.0, 1024.0);
        p.tick(2_000.0);
        assert_eq!(p.stars.particles().len(), 3);
        assert!((35..=59).contains(&p.confetti.particles().len()));
        assert_eq!(p.emojis.particles().len(), 1);
        assert_eq!(p.balloons.particles().len(), 1);
        assert_eq!(p.media.len(), 12);
    }
}

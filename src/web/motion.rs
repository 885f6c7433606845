//! Poses for the DOM overlays as functions of time. No DOM access here, so the
//! numbers are testable natively; `dom` turns a `Pose` into inline styles.

use crate::anim::{Easing, oscillate, progress, tween};

/// Start overlay fade-out after the start gesture.
pub const OVERLAY_EXIT_MS: f64 = 500.0;
const MUTE_DELAY_MS: f64 = 1000.0;
const MUTE_POP_MS: f64 = 400.0;
/// Lightbox media entrance, replayed on every focus change.
pub const LIGHTBOX_ENTER_MS: f64 = 350.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub dy_px: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Pose {
    pub const REST: Pose = Pose { dy_px: 0.0, scale: 1.0, opacity: 1.0 };

    pub fn transform(&self) -> String {
        format!("translateY({:.1}px) scale({:.4})", self.dy_px, self.scale)
    }
}

/// Headline breathing between 0.9 and 1, there and back every 4 s.
pub fn headline(now_ms: f64) -> Pose {
    Pose { scale: oscillate(&[0.9, 1.0, 0.9], 4_000.0, now_ms, Easing::EaseInOut), ..Pose::REST }
}

pub fn tagline(now_ms: f64) -> Pose {
    Pose { dy_px: oscillate(&[-5.0, 5.0, -5.0], 2_000.0, now_ms, Easing::EaseInOut), ..Pose::REST }
}

pub fn message_heading(now_ms: f64) -> Pose {
    Pose { scale: oscillate(&[1.0, 1.05, 1.0], 2_000.0, now_ms, Easing::EaseOut), ..Pose::REST }
}

pub fn overlay_exit(since_start_ms: f64) -> Pose {
    let p = progress(since_start_ms, 0.0, OVERLAY_EXIT_MS);
    Pose { dy_px: 0.0, scale: tween(1.0, 0.95, Easing::EaseInOut, p), opacity: tween(1.0, 0.0, Easing::EaseInOut, p) }
}

/// Mute button pops in one second after the start gesture.
pub fn mute_button(since_start_ms: f64) -> Pose {
    let p = progress(since_start_ms, MUTE_DELAY_MS, MUTE_POP_MS);
    Pose { dy_px: 0.0, scale: tween(0.0, 1.0, Easing::EaseOut, p), opacity: tween(0.0, 1.0, Easing::EaseOut, p) }
}

pub fn mute_button_done(since_start_ms: f64) -> bool {
    since_start_ms >= MUTE_DELAY_MS + MUTE_POP_MS
}

pub fn lightbox_media(since_focus_ms: f64) -> Pose {
    let p = progress(since_focus_ms, 0.0, LIGHTBOX_ENTER_MS);
    Pose {
        dy_px: tween(20.0, 0.0, Easing::EaseInOut, p),
        scale: tween(0.85, 1.0, Easing::EaseInOut, p),
        opacity: tween(0.0, 1.0, Easing::EaseInOut, p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn overlay_fades_and_shrinks_on_exit() {
        assert_eq!(overlay_exit(0.0), Pose::REST);
        let mid = overlay_exit(250.0);
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        let end = overlay_exit(OVERLAY_EXIT_MS);
        assert!(close(end.scale, 0.95));
        assert_eq!(end.opacity, 0.0);
    }

    #[test]
    fn mute_button_waits_a_second_then_pops() {
        assert_eq!(mute_button(999.0).scale, 0.0);
        assert_eq!(mute_button(999.0).opacity, 0.0);
        assert!(!mute_button_done(1_200.0));
        assert!(mute_button_done(1_400.0));
        assert_eq!(mute_button(1_400.0), Pose::REST);
    }

    #[test]
    fn lightbox_media_grows_from_085() {
        let start = lightbox_media(0.0);
        assert!(close(start.scale, 0.85));
        assert_eq!(start.opacity, 0.0);
        assert!(close(start.dy_px, 20.0));
        assert_eq!(lightbox_media(LIGHTBOX_ENTER_MS), Pose::REST);
    }

    #[test]
    fn looping_motions_stay_in_range() {
        for t in (0..8_000).step_by(37) {
            let t = t as f64;
            let h = headline(t).scale;
            assert!((0.9 - 1e-9..=1.0 + 1e-9).contains(&h));
            let m = message_heading(t).scale;
            assert!((1.0 - 1e-9..=1.05 + 1e-9).contains(&m));
            assert!(tagline(t).dy_px.abs() <= 5.0 + 1e-9);
        }
        assert!(close(headline(2_000.0).scale, 1.0));
        assert!(close(message_heading(1_000.0).scale, 1.05));
    }
}

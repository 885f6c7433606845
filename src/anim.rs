//! Easing curves and keyframe sampling.
//!
//! Every visual on the page is a pure function of a few stored random values and
//! elapsed time. These helpers turn "keyframes + times + easing" descriptions into
//! a single value for a given progress in `0.0..=1.0`.

/// CSS-style cubic bezier timing function through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        // B(t) with endpoints 0 and 1
        let mt = 1.0 - t;
        3.0 * mt * mt * t * a1 + 3.0 * mt * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * a1 + 6.0 * mt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Solves x(t) = x for t, then returns y(t).
    pub fn ease(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let mut t = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < 1e-7 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }
        // Newton stalled; bisection is always safe because x(t) is monotonic on [0,1].
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..40 {
            let cur = Self::sample(self.x1, self.x2, t);
            if (cur - x).abs() < 1e-7 {
                break;
            }
            if cur < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOut,
    Bezier(CubicBezier),
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).ease(t),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0).ease(t),
            Easing::Bezier(b) => b.ease(t),
        }
    }
}

/// Samples `values` at `progress`. `times` gives each keyframe's offset in
/// `0..=1`; when absent (or of the wrong length) keyframes are evenly spaced.
/// The easing applies per segment.
pub fn keyframes(values: &[f64], times: Option<&[f64]>, easing: Easing, progress: f64) -> f64 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let p = progress.clamp(0.0, 1.0);
            let n = values.len();
            let offset = |i: usize| -> f64 {
                match times {
                    Some(ts) if ts.len() == n => ts[i],
                    _ => i as f64 / (n - 1) as f64,
                }
            };
            for i in 0..n - 1 {
                let (t0, t1) = (offset(i), offset(i + 1));
                if p <= t1 || i == n - 2 {
                    let span = t1 - t0;
                    let local = if span <= 0.0 { 1.0 } else { ((p - t0) / span).clamp(0.0, 1.0) };
                    return lerp(values[i], values[i + 1], easing.apply(local));
                }
            }
            values[n - 1]
        }
    }
}

/// Infinite repeat of evenly spaced keyframes with the given period.
pub fn oscillate(values: &[f64], period_ms: f64, elapsed_ms: f64, easing: Easing) -> f64 {
    if period_ms <= 0.0 {
        return values.first().copied().unwrap_or(0.0);
    }
    let phase = elapsed_ms.max(0.0).rem_euclid(period_ms) / period_ms;
    keyframes(values, None, easing, phase)
}

/// Linear progress of a one-shot transition that starts `delay_ms` in and runs
/// for `duration_ms`, clamped to `0..=1`.
pub fn progress(elapsed_ms: f64, delay_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return if elapsed_ms >= delay_ms { 1.0 } else { 0.0 };
    }
    ((elapsed_ms - delay_ms) / duration_ms).clamp(0.0, 1.0)
}

/// Single from/to tween.
pub fn tween(from: f64, to: f64, easing: Easing, progress: f64) -> f64 {
    lerp(from, to, easing.apply(progress))
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn bezier_endpoints_and_linear_case() {
        let b = CubicBezier::new(0.25, 0.46, 0.45, 0.94);
        assert_eq!(b.ease(0.0), 0.0);
        assert_eq!(b.ease(1.0), 1.0);
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        assert!(close(linear.ease(0.3), 0.3));
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!(close(a + b, 1.0));
        assert!(close(Easing::EaseInOut.apply(0.5), 0.5));
    }

    #[test]
    fn overshooting_curve_goes_past_one() {
        let back = CubicBezier::new(0.34, 1.56, 0.64, 1.0);
        let peak = (1..100).map(|i| back.ease(i as f64 / 100.0)).fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn keyframes_respect_times() {
        let v = [0.0, 1.0, 1.0, 0.8, 0.0];
        let t = [0.0, 0.2, 0.5, 0.8, 1.0];
        assert!(close(keyframes(&v, Some(&t), Easing::Linear, 0.1), 0.5));
        assert!(close(keyframes(&v, Some(&t), Easing::Linear, 0.35), 1.0));
        assert!(close(keyframes(&v, Some(&t), Easing::Linear, 0.9), 0.4));
        assert!(close(keyframes(&v, Some(&t), Easing::Linear, 1.0), 0.0));
    }

    #[test]
    fn keyframes_fall_back_to_even_spacing() {
        let v = [0.0, 180.0, 360.0];
        let wrong = [0.0, 1.0];
        assert!(close(keyframes(&v, Some(&wrong), Easing::Linear, 0.25), 90.0));
        assert!(close(keyframes(&v, None, Easing::Linear, 0.75), 270.0));
    }

    #[test]
    fn oscillate_repeats() {
        let v = [-5.0, 5.0, -5.0];
        assert!(close(oscillate(&v, 2_000.0, 0.0, Easing::Linear), -5.0));
        assert!(close(oscillate(&v, 2_000.0, 1_000.0, Easing::Linear), 5.0));
        assert!(close(oscillate(&v, 2_000.0, 3_000.0, Easing::Linear), 5.0));
    }

    #[test]
    fn progress_waits_for_delay_then_clamps() {
        assert_eq!(progress(500.0, 1_000.0, 400.0), 0.0);
        assert!(close(progress(1_200.0, 1_000.0, 400.0), 0.5));
        assert_eq!(progress(5_000.0, 1_000.0, 400.0), 1.0);
        assert_eq!(progress(10.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn ease_out_front_loads_motion() {
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
    }
}

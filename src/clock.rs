//! Virtual-time timer scheduler.
//!
//! Every effect on the page owns one `Scheduler` and drives it from the frame
//! loop with `performance.now()` timestamps. Timers never call back on their own:
//! the owner pops due events in due-time order and reacts to them. While an event
//! is being handled the scheduler clock sits at that event's due time, so a
//! follow-up `set_timeout` lands exactly `delay` after the event that caused it,
//! no matter how late the frame arrived.

/// Activation generation. Bumped on every activation so callbacks scheduled by a
/// previous activation can be recognised and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(pub u32);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

/// Scheduling order; breaks ties between timers due at the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TimerId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Fired<E> {
    pub epoch: Epoch,
    /// Scheduled due time (ms), not the frame time the event was observed at.
    pub due_ms: f64,
    pub event: E,
}

struct Pending<E> {
    id: TimerId,
    due_ms: f64,
    period_ms: Option<f64>,
    epoch: Epoch,
    event: E,
}

pub struct Scheduler<E> {
    now_ms: f64,
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E: Clone> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<E: Clone> Scheduler<E> {
    pub fn new(now_ms: f64) -> Self {
        Self { now_ms, next_id: 0, pending: Vec::new() }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Moves the clock forward without firing anything. Used when an owner wakes
    /// up (activation) so new timers are relative to the real current time.
    pub fn settle(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    pub fn set_timeout(&mut self, delay_ms: f64, epoch: Epoch, event: E) {
        self.push(delay_ms, None, epoch, event);
    }

    /// Repeating timer; first fires one period from now (setInterval semantics).
    pub fn set_interval(&mut self, period_ms: f64, epoch: Epoch, event: E) {
        // zero periods would spin forever inside `pop_due`
        let period = period_ms.max(1.0);
        self.push(period, Some(period), epoch, event);
    }

    fn push(&mut self, delay_ms: f64, period_ms: Option<f64>, epoch: Epoch, event: E) {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            period_ms,
            epoch,
            event,
        });
    }

    pub fn clear_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Pops the earliest event due at or before `now_ms`. Ties resolve in
    /// scheduling order. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Fired<E>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;

        let due_ms = self.pending[idx].due_ms;
        if due_ms > self.now_ms {
            self.now_ms = due_ms;
        }
        let fired = match self.pending[idx].period_ms {
            Some(period) => {
                let p = &mut self.pending[idx];
                p.due_ms += period;
                Fired { epoch: p.epoch, due_ms, event: p.event.clone() }
            }
            None => {
                let p = self.pending.swap_remove(idx);
                Fired { epoch: p.epoch, due_ms, event: p.event }
            }
        };
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_fire_in_due_order() {
        let mut s = Scheduler::new(0.0);
        s.set_timeout(300.0, Epoch(0), "c");
        s.set_timeout(100.0, Epoch(0), "a");
        s.set_timeout(200.0, Epoch(0), "b");
        let mut seen = Vec::new();
        while let Some(f) = s.pop_due(1_000.0) {
            seen.push(f.event);
        }
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut s = Scheduler::new(50.0);
        s.set_timeout(100.0, Epoch(0), ());
        assert!(s.pop_due(149.0).is_none());
        assert!(s.pop_due(150.0).is_some());
    }

    #[test]
    fn interval_catches_up_and_stays_armed() {
        let mut s = Scheduler::new(0.0);
        s.set_interval(600.0, Epoch(3), ());
        let mut dues = Vec::new();
        while let Some(f) = s.pop_due(2_000.0) {
            assert_eq!(f.epoch, Epoch(3));
            dues.push(f.due_ms);
        }
        assert_eq!(dues, vec![600.0, 1_200.0, 1_800.0]);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn follow_up_timer_is_relative_to_due_time() {
        let mut s = Scheduler::new(0.0);
        s.set_timeout(100.0, Epoch(0), 1);
        let f = s.pop_due(5_000.0).unwrap();
        assert_eq!(s.now_ms(), 100.0);
        assert_eq!(f.due_ms, 100.0);
        s.set_timeout(250.0, Epoch(0), 2);
        let g = s.pop_due(5_000.0).unwrap();
        assert_eq!(g.due_ms, 350.0);
    }

    #[test]
    fn clear_all_drops_timeouts_and_intervals() {
        let mut s = Scheduler::new(0.0);
        s.set_timeout(10.0, Epoch(0), 'a');
        s.set_interval(10.0, Epoch(0), 'b');
        assert_eq!(s.pending(), 2);
        s.clear_all();
        assert_eq!(s.pending(), 0);
        assert!(s.pop_due(1e9).is_none());
    }

    #[test]
    fn settle_never_moves_backwards() {
        let mut s: Scheduler<()> = Scheduler::new(500.0);
        s.settle(100.0);
        assert_eq!(s.now_ms(), 500.0);
        s.settle(900.0);
        assert_eq!(s.now_ms(), 900.0);
    }
}

//! Media grid lifecycle: Empty -> Entering -> Settled.
//!
//! Activation shuffles the catalog once, prepares every entry up front and then
//! inserts them into the visible list on a fixed stagger. A settle timer fires a
//! buffer after the last insertion; only then do clicks open the lightbox.
//! Deactivation drops the list and every pending timer synchronously.

use rand::Rng;

use super::layout::{Breakpoint, GridLayout};
use super::lightbox::{Lightbox, LightboxKey};
use super::{MediaEntry, MediaSource, shuffled};
use crate::anim::{CubicBezier, Easing, tween};
use crate::clock::{Epoch, Scheduler};
use crate::particles::Frame;

/// Entrance animation delay step per cell.
pub const ENTRANCE_STEP_MS: f64 = 60.0;
/// Gap between two insertions into the visible list.
pub const INSERT_STAGGER_MS: f64 = 70.0;
/// Time after the last insertion before interaction is enabled.
pub const SETTLE_BUFFER_MS: f64 = 4500.0;
pub const ENTRANCE_MS: f64 = 1000.0;

const ENTRANCE: Easing = Easing::Bezier(CubicBezier::new(0.4, 0.0, 0.2, 1.0));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridPhase {
    Empty,
    Entering,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum GridEvent {
    Insert(usize),
    Settle,
}

/// Visible cell plus the time it joined the list.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEntry {
    pub entry: MediaEntry,
    pub inserted_ms: f64,
}

impl PlacedEntry {
    /// Entrance animation state: from nothing to the entry's jittered scale and rotation.
    pub fn frame(&self, now_ms: f64) -> Frame {
        let local = now_ms - self.inserted_ms - self.entry.delay_ms;
        let p = (local / ENTRANCE_MS).clamp(0.0, 1.0);
        Frame {
            x_vw: 0.0,
            y_vh: 0.0,
            dy_px: 0.0,
            rotation_deg: tween(0.0, self.entry.rotation, ENTRANCE, p),
            scale: tween(0.0, self.entry.scale, ENTRANCE, p),
            opacity: tween(0.0, 1.0, ENTRANCE, p),
        }
    }

    pub fn entrance_done(&self, now_ms: f64) -> bool {
        now_ms >= self.inserted_ms + self.entry.delay_ms + ENTRANCE_MS
    }
}

pub struct MediaGrid {
    catalog: Vec<MediaSource>,
    breakpoints: Vec<Breakpoint>,
    phase: GridPhase,
    epoch: Epoch,
    layout: Option<GridLayout>,
    prepared: Vec<MediaEntry>,
    visible: Vec<PlacedEntry>,
    timers: Scheduler<GridEvent>,
    lightbox: Lightbox,
    hovered: Option<usize>,
    next_id: u64,
}

impl MediaGrid {
    pub fn new(catalog: Vec<MediaSource>, breakpoints: Vec<Breakpoint>) -> Self {
        Self {
            catalog,
            breakpoints,
            phase: GridPhase::Empty,
            epoch: Epoch::default(),
            layout: None,
            prepared: Vec::new(),
            visible: Vec::new(),
            timers: Scheduler::default(),
            lightbox: Lightbox::default(),
            hovered: None,
            next_id: 0,
        }
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == GridPhase::Settled
    }

    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    pub fn entries(&self) -> &[PlacedEntry] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Time from activation until the grid settles.
    pub fn settle_after_ms(&self) -> f64 {
        self.catalog.len() as f64 * INSERT_STAGGER_MS + SETTLE_BUFFER_MS
    }

    pub fn activate<R: Rng + ?Sized>(&mut self, now_ms: f64, viewport_width: f64, rng: &mut R) {
        if self.phase != GridPhase::Empty {
            return;
        }
        self.epoch = self.epoch.next();
        self.timers.clear_all();
        self.timers.settle(now_ms);

        let layout = GridLayout::for_width(&self.breakpoints, viewport_width);
        let order = shuffled(&self.catalog, rng);
        self.prepared = order
            .into_iter()
            .enumerate()
            .map(|(i, source)| {
                let (row, col) = layout.cell(i);
                let id = self.next_id;
                self.next_id += 1;
                MediaEntry {
                    id,
                    source,
                    layer: rng.gen_range(0..3),
                    row,
                    col,
                    rotation: rng.gen_range(-5.0..5.0),
                    scale: rng.gen_range(0.92..1.08),
                    delay_ms: i as f64 * ENTRANCE_STEP_MS,
                }
            })
            .collect();
        self.layout = Some(layout);
        self.phase = GridPhase::Entering;

        for i in 0..self.prepared.len() {
            self.timers.set_timeout(i as f64 * INSERT_STAGGER_MS, self.epoch, GridEvent::Insert(i));
        }
        self.timers.set_timeout(self.settle_after_ms(), self.epoch, GridEvent::Settle);
    }

    pub fn deactivate(&mut self) {
        self.timers.clear_all();
        self.prepared.clear();
        self.visible.clear();
        self.lightbox.close();
        self.hovered = None;
        self.layout = None;
        self.phase = GridPhase::Empty;
    }

    pub fn set_active<R: Rng + ?Sized>(&mut self, active: bool, now_ms: f64, viewport_width: f64, rng: &mut R) {
        if active {
            self.activate(now_ms, viewport_width, rng);
        } else {
            self.deactivate();
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            if fired.epoch != self.epoch || self.phase == GridPhase::Empty {
                continue;
            }
            match fired.event {
                GridEvent::Insert(i) => {
                    if let Some(entry) = self.prepared.get(i) {
                        self.visible.push(PlacedEntry { entry: entry.clone(), inserted_ms: fired.due_ms });
                    }
                }
                GridEvent::Settle => self.phase = GridPhase::Settled,
            }
        }
        self.timers.settle(now_ms);
    }

    // --- Interaction -----------------------------------------------------------

    /// Opens the lightbox on `index`. Ignored until the grid has settled.
    pub fn click(&mut self, index: usize) -> bool {
        if !self.is_settled() || index >= self.visible.len() {
            return false;
        }
        self.lightbox.open(index);
        true
    }

    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// "Tap to view" hint visibility for a cell.
    pub fn shows_hint(&self, index: usize) -> bool {
        self.is_settled() && self.hovered == Some(index)
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn focused_entry(&self) -> Option<&MediaEntry> {
        self.lightbox.focused().and_then(|i| self.visible.get(i)).map(|p| &p.entry)
    }

    pub fn next(&mut self) {
        self.lightbox.next(self.visible.len());
    }

    pub fn previous(&mut self) {
        self.lightbox.previous(self.visible.len());
    }

    pub fn close(&mut self) {
        self.lightbox.close();
    }

    /// Keyboard handling; returns true when the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match LightboxKey::from_key(key) {
            Some(k) => self.lightbox.handle_key(k, self.visible.len()),
            None => false,
        }
    }
}

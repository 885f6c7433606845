//! The memory grid: a shuffled catalog of photos and videos that flies in cell by
//! cell and, once settled, can be browsed in a lightbox.

use rand::Rng;
use rand::seq::SliceRandom;

pub mod grid;
pub mod layout;
pub mod lightbox;

pub use grid::{GridPhase, MediaGrid};
pub use layout::{Breakpoint, GridLayout};
pub use lightbox::{Lightbox, LightboxKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    Photo,
    Video,
}

/// One catalog item. The page never looks inside the asset, it only hands the
/// reference to an `<img>` or `<video>` element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSource {
    pub src: String,
    pub kind: MediaKind,
}

impl MediaSource {
    pub fn photo(src: impl Into<String>) -> Self {
        Self { src: src.into(), kind: MediaKind::Photo }
    }

    pub fn video(src: impl Into<String>) -> Self {
        Self { src: src.into(), kind: MediaKind::Video }
    }
}

/// A placed grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaEntry {
    pub id: u64,
    pub source: MediaSource,
    /// Visual depth layer, 0..=2.
    pub layer: u8,
    pub row: usize,
    pub col: usize,
    /// Jitter, degrees in [-5, 5).
    pub rotation: f64,
    /// Jitter in [0.92, 1.08).
    pub scale: f64,
    /// Delay of the entrance animation after the cell is inserted.
    pub delay_ms: f64,
}

/// Uniform random permutation (Fisher–Yates) of `items`, leaving the input untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

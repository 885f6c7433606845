//! Responsive grid sizing. A plain lookup table keyed by viewport width.

/// Grid geometry for one viewport class, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub columns: usize,
    pub gap_px: f64,
    pub padding_px: f64,
    pub cell_px: f64,
}

/// Layout applying to viewports narrower than `below_width` (or to every width
/// when `below_width` is `None`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    pub below_width: Option<f64>,
    pub layout: GridLayout,
}

pub const PHONE: GridLayout = GridLayout { columns: 2, gap_px: 10.0, padding_px: 10.0, cell_px: 120.0 };
pub const TABLET: GridLayout = GridLayout { columns: 3, gap_px: 16.0, padding_px: 30.0, cell_px: 160.0 };
pub const DESKTOP: GridLayout = GridLayout { columns: 4, gap_px: 16.0, padding_px: 30.0, cell_px: 200.0 };

pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint { below_width: Some(480.0), layout: PHONE },
        Breakpoint { below_width: Some(768.0), layout: TABLET },
        Breakpoint { below_width: None, layout: DESKTOP },
    ]
}

impl GridLayout {
    /// First breakpoint (in table order) whose bound exceeds `width`. Falls back
    /// to the last entry, then to the desktop layout for an empty table.
    pub fn for_width(table: &[Breakpoint], width: f64) -> GridLayout {
        table
            .iter()
            .find(|b| b.below_width.is_none_or(|limit| width < limit))
            .or(table.last())
            .map(|b| b.layout)
            .unwrap_or(DESKTOP)
    }

    /// Row / column of the `index`-th cell, filled row-major.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let cols = self.columns.max(1);
        (index / cols, index % cols)
    }
}

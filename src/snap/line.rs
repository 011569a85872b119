//! Snap lines and snap maps

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A guide line segment drawn on the page, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapLine {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

impl SnapLine {
    pub fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self { start, end }
    }

    /// Full-height line at `x`
    pub fn vertical(x: f64, page_height: f64) -> Self {
        Self::new([x, 0.0], [x, page_height])
    }

    /// Full-width line at `y`
    pub fn horizontal(y: f64, page_width: f64) -> Self {
        Self::new([0.0, y], [page_width, y])
    }

    /// Total order over endpoints, start first
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.start[0]
            .total_cmp(&other.start[0])
            .then(self.start[1].total_cmp(&other.start[1]))
            .then(self.end[0].total_cmp(&other.end[0]))
            .then(self.end[1].total_cmp(&other.end[1]))
    }
}

/// Rounded pixel offset to the guide lines shown when snapping there
pub type SnapMap = BTreeMap<i64, Vec<SnapLine>>;

/// Add `line` as a snap target at `offset`.
///
/// The offset is rounded to a whole pixel and rejected if it falls outside
/// `[0, limit]`. A line equal to one already stored at that offset is not
/// added twice, and the lines at each offset stay sorted.
///
/// # Returns
/// Whether the line was added
pub fn insert_snap_line(map: &mut SnapMap, offset: f64, limit: f64, line: SnapLine) -> bool {
    let key = offset.round();
    if !key.is_finite() || key < 0.0 || key > limit {
        return false;
    }

    let lines = map.entry(key as i64).or_default();
    if lines.iter().any(|existing| *existing == line) {
        return false;
    }

    lines.push(line);
    lines.sort_by(SnapLine::total_cmp);
    true
}

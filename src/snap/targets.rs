//! Snap target computation
//!
//! Snap targets are split by axis. Horizontal snaps are x offsets drawn as
//! vertical guides; vertical snaps are y offsets drawn as horizontal guides.
//! Both start from the page edges and center, and every sibling of the
//! dragged block adds its own edges.

use serde::{Deserialize, Serialize};

use super::line::{insert_snap_line, SnapLine, SnapMap};
use crate::config::PageDimensions;
use crate::host::{BlockId, BoundingBox, HostEditor, PageId};

/// Snap targets for one block, relative to its page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapTargets {
    /// x offsets with their vertical guides
    pub horizontal_snaps: SnapMap,
    /// y offsets with their horizontal guides
    pub vertical_snaps: SnapMap,
    /// Page left edge in viewport coordinates
    pub parent_block_offset_left: f64,
    /// Page top edge in viewport coordinates
    pub parent_block_offset_top: f64,
}

impl SnapTargets {
    /// No snapping at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal_snaps.is_empty() && self.vertical_snaps.is_empty()
    }
}

/// Compute snap targets from sibling rectangles.
///
/// `siblings` and `parent` are in viewport coordinates; the resulting
/// offsets are relative to `parent`'s top-left corner.
pub fn compute_snap_targets(
    page: PageDimensions,
    parent: BoundingBox,
    siblings: &[BoundingBox],
) -> SnapTargets {
    let PageDimensions { width, height } = page;

    let mut horizontal = SnapMap::new();
    let mut vertical = SnapMap::new();

    for anchor in [0.0, width / 2.0, width] {
        insert_snap_line(&mut horizontal, anchor, width, SnapLine::vertical(anchor, height));
    }
    for anchor in [0.0, height / 2.0, height] {
        insert_snap_line(&mut vertical, anchor, height, SnapLine::horizontal(anchor, width));
    }

    for sibling in siblings {
        for x in [sibling.left - parent.left, sibling.right - parent.left] {
            insert_snap_line(&mut horizontal, x, width, SnapLine::vertical(x, height));
        }
        for y in [sibling.top - parent.top, sibling.bottom - parent.top] {
            insert_snap_line(&mut vertical, y, height, SnapLine::horizontal(y, width));
        }
    }

    SnapTargets {
        horizontal_snaps: horizontal,
        vertical_snaps: vertical,
        parent_block_offset_left: parent.left,
        parent_block_offset_top: parent.top,
    }
}

/// Snap targets for `block` using live layout from the host.
///
/// Returns empty targets when the block isn't on the current page or the
/// page isn't laid out. Siblings without layout are skipped.
pub fn snap_targets_for_block<H: HostEditor + ?Sized>(
    host: &H,
    current_page: Option<&PageId>,
    page: PageDimensions,
    block: &BlockId,
) -> SnapTargets {
    let Some(parent) = host.block_root(block) else {
        return SnapTargets::empty();
    };

    if current_page != Some(&parent) {
        return SnapTargets::empty();
    }

    let Some(parent_rect) = host.block_rect(&parent) else {
        return SnapTargets::empty();
    };

    let siblings: Vec<BoundingBox> = host
        .block_order(Some(&parent))
        .iter()
        .filter(|id| *id != block)
        .filter_map(|id| host.block_rect(id))
        .collect();

    compute_snap_targets(page, parent_rect, &siblings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn page() -> PageDimensions {
        PageDimensions {
            width: 300.0,
            height: 500.0,
        }
    }

    #[test]
    fn test_anchors_without_siblings() {
        let targets = compute_snap_targets(page(), BoundingBox::default(), &[]);

        assert_eq!(targets.horizontal_snaps.keys().copied().collect::<Vec<_>>(), vec![0, 150, 300]);
        assert_eq!(targets.vertical_snaps.keys().copied().collect::<Vec<_>>(), vec![0, 250, 500]);
    }

    #[test]
    fn test_guides_span_the_page() {
        let targets = compute_snap_targets(page(), BoundingBox::default(), &[]);

        let center_x = targets.horizontal_snaps[&150][0];
        assert_eq!(center_x, SnapLine::new([150.0, 0.0], [150.0, 500.0]));

        let center_y = targets.vertical_snaps[&250][0];
        assert_eq!(center_y, SnapLine::new([0.0, 250.0], [300.0, 250.0]));
    }

    #[test]
    fn test_sibling_edges_relative_to_parent() {
        let parent = BoundingBox::from_size(100.0, 40.0, 300.0, 500.0);
        let sibling = BoundingBox::from_size(120.5, 90.0, 60.0, 30.0);

        let targets = compute_snap_targets(page(), parent, &[sibling]);

        assert!(targets.horizontal_snaps.contains_key(&21));
        assert!(targets.horizontal_snaps.contains_key(&81));
        assert!(targets.vertical_snaps.contains_key(&50));
        assert!(targets.vertical_snaps.contains_key(&80));

        let left = targets.horizontal_snaps[&21][0];
        assert_relative_eq!(left.start[0], 20.5);
        assert_relative_eq!(targets.parent_block_offset_left, 100.0);
        assert_relative_eq!(targets.parent_block_offset_top, 40.0);
    }

    #[test]
    fn test_sibling_outside_page_is_rejected() {
        let sibling = BoundingBox::new(-50.0, 600.0, -10.0, 700.0);
        let targets = compute_snap_targets(page(), BoundingBox::default(), &[sibling]);

        assert_eq!(targets.horizontal_snaps.len(), 3);
        assert_eq!(targets.vertical_snaps.len(), 3);
    }
}

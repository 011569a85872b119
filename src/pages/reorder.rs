//! Page reordering session
//!
//! While reordering, the page carousel works on a local copy of the page
//! order. Moves only touch that copy; the host keeps the canonical order.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::host::{HostEditor, PageId};

/// Local page order plus the reordering flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockOrderState {
    /// Snapshot of the page order, modified by moves
    order: Vec<PageId>,
    /// Whether a reordering session is active
    is_reordering: bool,
}

impl fmt::Display for BlockOrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.is_reordering { "Reordering" } else { "Idle" };
        write!(f, "{} ({} pages)", mode, self.order.len())
    }
}

impl BlockOrderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the canonical order and enter reordering mode
    pub fn start<H: HostEditor + ?Sized>(&mut self, host: &H) {
        self.order = host.block_order(None);
        self.is_reordering = true;
        debug!("[REORDER] Started with {} pages", self.order.len());
    }

    /// Move `page` to `index` in the local snapshot
    ///
    /// The index is clamped to the end of the order. A page that isn't in
    /// the snapshot leaves it unchanged.
    ///
    /// # Returns
    /// The index the page ended up at
    pub fn move_page(&mut self, page: &PageId, index: usize) -> Option<usize> {
        let current_index = self.order.iter().position(|p| p == page)?;

        let moved = self.order.remove(current_index);
        let target_index = index.min(self.order.len());
        self.order.insert(target_index, moved);

        debug!("[REORDER] Moved {} from {} to {}", page, current_index, target_index);
        Some(target_index)
    }

    /// Leave reordering mode, keeping the last snapshot
    pub fn stop(&mut self) {
        self.is_reordering = false;
        debug!("[REORDER] Stopped");
    }

    /// Throw away local moves and leave reordering mode
    pub fn reset<H: HostEditor + ?Sized>(&mut self, host: &H) {
        self.order = host.block_order(None);
        self.is_reordering = false;
        debug!("[REORDER] Reset to canonical order");
    }

    pub fn order(&self) -> &[PageId] {
        &self.order
    }

    pub fn is_reordering(&self) -> bool {
        self.is_reordering
    }
}

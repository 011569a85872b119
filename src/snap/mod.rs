//! Snap Guides
//!
//! Alignment guides for dragging blocks on a page. Targets are rebuilt from
//! the current layout on every request and never stored.

mod line;
mod state;
mod targets;

pub use line::{insert_snap_line, SnapLine, SnapMap};
pub use state::SnapLinesState;
pub use targets::{compute_snap_targets, snap_targets_for_block, SnapTargets};

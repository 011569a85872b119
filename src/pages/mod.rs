//! Page Selection and Reordering
//!
//! - Current page: which page the canvas shows
//! - Block order: the local page order used while reordering pages

mod current;
mod reorder;

pub use current::CurrentPage;
pub use reorder::BlockOrderState;

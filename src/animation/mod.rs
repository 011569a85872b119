//! Animation Ordering
//!
//! Elements on a page can be told to start animating once another element
//! has finished. The resulting "play after" links form a forest per page:
//! - adding a link never creates a cycle (bad links are dropped)
//! - removing an element hands its followers to its own predecessor

mod order;
mod table;

pub use order::{has_cycle, AnimationEntry, PageAnimationOrder};
pub use table::AnimationOrderTable;

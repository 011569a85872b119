//! Story Editor - State core of a visual story editor
//!
//! Authors lay out elements on a sequence of pages, chain element
//! animations, and align elements with snap guides. This crate holds the
//! editor-side state for that, layered on a host block editor.
//!
//! # Architecture
//!
//! - Animation: per-page "play after" forest, kept acyclic and synced to a
//!   block attribute on the host
//! - Pages: current page selection and the page reordering session
//! - Snap: alignment guides computed from sibling layout
//!
//! The host editor is always passed in through the [`HostEditor`] trait.

pub mod animation;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod pages;
pub mod settings;
pub mod snap;
pub mod store;

pub use animation::{AnimationEntry, AnimationOrderTable, PageAnimationOrder};
pub use config::StoryConfig;
pub use error::{Result, StoryError};
pub use host::{Block, BlockId, BoundingBox, ElementId, HostEditor, InMemoryHost, PageId};
pub use settings::StorySettings;
pub use store::{Action, StoryStore};

//! Host Document Editor
//!
//! The block editor the story extension is layered on. It owns block
//! existence, attributes, layout and the canonical page order; the stores
//! in this crate only read from it and request attribute writes.
//!
//! Everything goes through the [`HostEditor`] trait so a store never looks
//! the editor up on its own. [`InMemoryHost`] is the bundled implementation
//! used by the CLI and by tests.

mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

pub use memory::{DocumentFile, ElementFile, InMemoryHost, PageFile};

/// Attribute bag of a block or of the document meta.
///
/// A `Value::Null` entry in an update clears that attribute.
pub type Attributes = Map<String, Value>;

/// Opaque, stable block identifier handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

/// Pages are top-level blocks.
pub type PageId = BlockId;

/// Visual elements are blocks nested in a page.
pub type ElementId = BlockId;

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A block as seen by the extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Client id of the block
    pub client_id: BlockId,
    /// Block type name (e.g. "amp/amp-story-page")
    pub name: String,
    /// Block attributes
    #[serde(default)]
    pub attributes: Attributes,
}

impl Block {
    pub fn new(client_id: impl Into<BlockId>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Get a string attribute, ignoring empty strings
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Layout rectangle of a rendered block in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from an origin and a size
    pub fn from_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }
}

/// Capabilities the stores consume from the host document editor.
pub trait HostEditor {
    /// Look up a block by id
    fn block(&self, id: &BlockId) -> Option<Block>;

    /// Ordered child ids of `root`, or the top-level (page) order for `None`
    fn block_order(&self, root: Option<&BlockId>) -> Vec<BlockId>;

    /// Id of the block containing `id`, `None` for top-level blocks
    fn block_root(&self, id: &BlockId) -> Option<BlockId>;

    /// Sibling `offset` positions away from `id` (-1 = previous, 1 = next)
    fn adjacent_block(&self, id: &BlockId, offset: isize) -> Option<BlockId>;

    /// Current layout of the block, `None` if it is not rendered
    fn block_rect(&self, id: &BlockId) -> Option<BoundingBox>;

    /// Document-level meta attributes
    fn document_meta(&self) -> Attributes;

    /// Merge `attributes` into the block's attributes
    fn update_block_attributes(&mut self, id: &BlockId, attributes: Attributes) -> Result<()>;

    /// Replace the document meta
    fn edit_document_meta(&mut self, meta: Attributes) -> Result<()>;

    /// Whether the block currently exists
    fn has_block(&self, id: &BlockId) -> bool {
        self.block(id).is_some()
    }
}

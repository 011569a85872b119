//! In-memory host document
//!
//! A small block tree (pages holding elements) with layout rectangles and
//! document meta. Loaded from and saved to a JSON document file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Attributes, Block, BlockId, BoundingBox, HostEditor};
use crate::error::{Result, StoryError};

/// Block name given to pages that don't specify one
pub const PAGE_BLOCK_NAME: &str = "amp/amp-story-page";

/// Block name given to elements that don't specify one
pub const ELEMENT_BLOCK_NAME: &str = "amp/amp-story-text";

/// Document file stored as JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFile {
    #[serde(default)]
    pub meta: Attributes,
    #[serde(default)]
    pub pages: Vec<PageFile>,
}

/// A page entry of a [`DocumentFile`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFile {
    /// Client id; generated when missing
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default = "default_page_name")]
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub rect: Option<BoundingBox>,
    #[serde(default)]
    pub elements: Vec<ElementFile>,
}

/// An element entry of a [`PageFile`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFile {
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default = "default_element_name")]
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub rect: Option<BoundingBox>,
}

fn default_page_name() -> String {
    PAGE_BLOCK_NAME.to_string()
}

fn default_element_name() -> String {
    ELEMENT_BLOCK_NAME.to_string()
}

#[derive(Debug, Clone)]
struct StoredBlock {
    block: Block,
    root: Option<BlockId>,
    rect: Option<BoundingBox>,
}

/// In-memory block editor
///
/// Pages are top-level blocks; elements are their inner blocks. Writes can
/// be switched off with [`set_read_only`](Self::set_read_only) to simulate
/// an editor that rejects attribute updates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    blocks: HashMap<BlockId, StoredBlock>,
    pages: Vec<BlockId>,
    children: HashMap<BlockId, Vec<BlockId>>,
    meta: Attributes,
    read_only: bool,
}

impl InMemoryHost {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh client id
    pub fn generate_client_id() -> BlockId {
        BlockId::new(Uuid::new_v4().to_string())
    }

    /// Append a page to the document
    pub fn insert_page(&mut self, block: Block) -> Result<BlockId> {
        let id = block.client_id.clone();
        self.ensure_unique(&id)?;

        self.pages.push(id.clone());
        self.children.insert(id.clone(), Vec::new());
        self.blocks.insert(
            id.clone(),
            StoredBlock {
                block,
                root: None,
                rect: None,
            },
        );
        Ok(id)
    }

    /// Append an element to a page
    pub fn insert_element(&mut self, page: &BlockId, block: Block) -> Result<BlockId> {
        let id = block.client_id.clone();
        self.ensure_unique(&id)?;

        let siblings = self
            .children
            .get_mut(page)
            .ok_or_else(|| StoryError::BlockNotFound {
                block: page.to_string(),
            })?;
        siblings.push(id.clone());

        self.blocks.insert(
            id.clone(),
            StoredBlock {
                block,
                root: Some(page.clone()),
                rect: None,
            },
        );
        Ok(id)
    }

    /// Remove a block and everything nested in it
    pub fn remove_block(&mut self, id: &BlockId) -> Option<Block> {
        let stored = self.blocks.remove(id)?;

        match &stored.root {
            Some(root) => {
                if let Some(siblings) = self.children.get_mut(root) {
                    siblings.retain(|child| child != id);
                }
            }
            None => self.pages.retain(|page| page != id),
        }

        for child in self.children.remove(id).unwrap_or_default() {
            self.blocks.remove(&child);
        }

        Some(stored.block)
    }

    /// Set the layout rectangle of a block
    pub fn set_rect(&mut self, id: &BlockId, rect: BoundingBox) -> Result<()> {
        let stored = self
            .blocks
            .get_mut(id)
            .ok_or_else(|| StoryError::BlockNotFound {
                block: id.to_string(),
            })?;
        stored.rect = Some(rect);
        Ok(())
    }

    /// Reject every subsequent write when `read_only` is set
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Canonical page order
    pub fn pages(&self) -> &[BlockId] {
        &self.pages
    }

    /// Number of blocks in the document, pages included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Build a host from a parsed document file
    pub fn from_document(document: DocumentFile) -> Result<Self> {
        let mut host = Self::new();
        host.meta = document.meta;

        for page in document.pages {
            let page_id = page.id.unwrap_or_else(Self::generate_client_id);
            let mut block = Block::new(page_id.clone(), page.name);
            block.attributes = page.attributes;
            host.insert_page(block)?;
            if let Some(rect) = page.rect {
                host.set_rect(&page_id, rect)?;
            }

            for element in page.elements {
                let element_id = element.id.unwrap_or_else(Self::generate_client_id);
                let mut block = Block::new(element_id.clone(), element.name);
                block.attributes = element.attributes;
                host.insert_element(&page_id, block)?;
                if let Some(rect) = element.rect {
                    host.set_rect(&element_id, rect)?;
                }
            }
        }

        Ok(host)
    }

    /// Snapshot the host back into the document file layout
    pub fn to_document(&self) -> DocumentFile {
        let pages = self
            .pages
            .iter()
            .filter_map(|page_id| {
                let stored = self.blocks.get(page_id)?;
                let elements = self
                    .children
                    .get(page_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|id| self.blocks.get(id))
                    .map(|child| ElementFile {
                        id: Some(child.block.client_id.clone()),
                        name: child.block.name.clone(),
                        attributes: child.block.attributes.clone(),
                        rect: child.rect,
                    })
                    .collect();

                Some(PageFile {
                    id: Some(page_id.clone()),
                    name: stored.block.name.clone(),
                    attributes: stored.block.attributes.clone(),
                    rect: stored.rect,
                    elements,
                })
            })
            .collect();

        DocumentFile {
            meta: self.meta.clone(),
            pages,
        }
    }

    /// Load a document from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StoryError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let document: DocumentFile = serde_json::from_reader(reader)?;

        Self::from_document(document)
    }

    /// Save the document to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_document())?;
        Ok(())
    }

    fn ensure_unique(&self, id: &BlockId) -> Result<()> {
        if self.blocks.contains_key(id) {
            return Err(StoryError::InvalidDocument {
                reason: format!("duplicate block id '{}'", id),
            });
        }
        Ok(())
    }
}

impl HostEditor for InMemoryHost {
    fn block(&self, id: &BlockId) -> Option<Block> {
        self.blocks.get(id).map(|stored| stored.block.clone())
    }

    fn block_order(&self, root: Option<&BlockId>) -> Vec<BlockId> {
        match root {
            Some(root) => self.children.get(root).cloned().unwrap_or_default(),
            None => self.pages.clone(),
        }
    }

    fn block_root(&self, id: &BlockId) -> Option<BlockId> {
        self.blocks.get(id).and_then(|stored| stored.root.clone())
    }

    fn adjacent_block(&self, id: &BlockId, offset: isize) -> Option<BlockId> {
        let stored = self.blocks.get(id)?;
        let siblings = match &stored.root {
            Some(root) => self.children.get(root)?,
            None => &self.pages,
        };

        let index = siblings.iter().position(|sibling| sibling == id)?;
        let target = index.checked_add_signed(offset)?;
        siblings.get(target).cloned()
    }

    fn block_rect(&self, id: &BlockId) -> Option<BoundingBox> {
        self.blocks.get(id).and_then(|stored| stored.rect)
    }

    fn document_meta(&self) -> Attributes {
        self.meta.clone()
    }

    fn update_block_attributes(&mut self, id: &BlockId, attributes: Attributes) -> Result<()> {
        if self.read_only {
            return Err(StoryError::HostWriteRejected {
                block: id.to_string(),
                reason: "document is read-only".to_string(),
            });
        }

        let stored = self
            .blocks
            .get_mut(id)
            .ok_or_else(|| StoryError::BlockNotFound {
                block: id.to_string(),
            })?;

        for (key, value) in attributes {
            if value.is_null() {
                stored.block.attributes.remove(&key);
            } else {
                stored.block.attributes.insert(key, value);
            }
        }

        Ok(())
    }

    fn edit_document_meta(&mut self, meta: Attributes) -> Result<()> {
        if self.read_only {
            return Err(StoryError::MetaWriteRejected {
                reason: "document is read-only".to_string(),
            });
        }

        self.meta = meta
            .into_iter()
            .filter(|(_, value)| !matches!(value, Value::Null))
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn two_page_host() -> InMemoryHost {
        let mut host = InMemoryHost::new();
        host.insert_page(Block::new("page-1", PAGE_BLOCK_NAME)).unwrap();
        host.insert_page(Block::new("page-2", PAGE_BLOCK_NAME)).unwrap();
        host.insert_element(&"page-1".into(), Block::new("text-1", ELEMENT_BLOCK_NAME))
            .unwrap();
        host.insert_element(&"page-1".into(), Block::new("text-2", ELEMENT_BLOCK_NAME))
            .unwrap();
        host
    }

    #[test]
    fn test_block_order_and_roots() {
        let host = two_page_host();

        assert_eq!(
            host.block_order(None),
            vec![BlockId::new("page-1"), BlockId::new("page-2")]
        );
        assert_eq!(
            host.block_order(Some(&"page-1".into())),
            vec![BlockId::new("text-1"), BlockId::new("text-2")]
        );
        assert_eq!(host.block_root(&"text-2".into()), Some("page-1".into()));
        assert_eq!(host.block_root(&"page-2".into()), None);
    }

    #[test]
    fn test_adjacent_block() {
        let host = two_page_host();

        assert_eq!(host.adjacent_block(&"page-1".into(), 1), Some("page-2".into()));
        assert_eq!(host.adjacent_block(&"page-1".into(), -1), None);
        assert_eq!(host.adjacent_block(&"page-2".into(), 1), None);
        assert_eq!(host.adjacent_block(&"text-2".into(), -1), Some("text-1".into()));
        assert_eq!(host.adjacent_block(&"missing".into(), 1), None);
    }

    #[test]
    fn test_insert_duplicate_id_fails() {
        let mut host = two_page_host();
        let result = host.insert_page(Block::new("page-1", PAGE_BLOCK_NAME));
        assert!(matches!(result, Err(StoryError::InvalidDocument { .. })));
    }

    #[test]
    fn test_insert_element_into_missing_page() {
        let mut host = two_page_host();
        let result = host.insert_element(&"nope".into(), Block::new("x", ELEMENT_BLOCK_NAME));
        assert!(matches!(result, Err(StoryError::BlockNotFound { .. })));
    }

    #[test]
    fn test_remove_page_removes_elements() {
        let mut host = two_page_host();
        let removed = host.remove_block(&"page-1".into());

        assert!(removed.is_some());
        assert!(!host.has_block(&"text-1".into()));
        assert_eq!(host.block_order(None), vec![BlockId::new("page-2")]);
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_update_attributes_merges_and_clears() {
        let mut host = two_page_host();
        let id = BlockId::new("text-1");

        let mut attrs = Attributes::new();
        attrs.insert("anchor".into(), json!("intro"));
        attrs.insert("ampAnimationAfter".into(), json!("title"));
        host.update_block_attributes(&id, attrs).unwrap();

        let mut clear = Attributes::new();
        clear.insert("ampAnimationAfter".into(), Value::Null);
        host.update_block_attributes(&id, clear).unwrap();

        let block = host.block(&id).unwrap();
        assert_eq!(block.attribute_str("anchor"), Some("intro"));
        assert!(!block.attributes.contains_key("ampAnimationAfter"));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut host = two_page_host();
        host.set_read_only(true);

        let result = host.update_block_attributes(&"text-1".into(), Attributes::new());
        assert!(matches!(result, Err(StoryError::HostWriteRejected { .. })));
        assert!(host.edit_document_meta(Attributes::new()).is_err());
    }

    #[test]
    fn test_document_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("story.json");

        let mut host = two_page_host();
        host.set_rect(&"text-1".into(), BoundingBox::from_size(10.0, 10.0, 50.0, 20.0))
            .unwrap();
        host.save(&path).unwrap();

        let loaded = InMemoryHost::load(&path).unwrap();
        assert_eq!(loaded.pages(), host.pages());
        assert_eq!(
            loaded.block_rect(&"text-1".into()),
            Some(BoundingBox::new(10.0, 10.0, 60.0, 30.0))
        );
    }

    #[test]
    fn test_document_generates_missing_ids() {
        let document: DocumentFile = serde_json::from_value(json!({
            "pages": [ { "elements": [ {}, {} ] } ]
        }))
        .unwrap();

        let host = InMemoryHost::from_document(document).unwrap();
        let page = host.pages()[0].clone();
        assert_eq!(host.block_order(Some(&page)).len(), 2);
        assert_eq!(host.block(&page).unwrap().name, PAGE_BLOCK_NAME);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = InMemoryHost::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoryError::FileNotFound { .. })));
    }
}

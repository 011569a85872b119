//! Animation Order Table
//!
//! Per-page animation orders plus the write-through of the derived
//! "animate after" attribute to the host editor.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::order::PageAnimationOrder;
use crate::config::AttributeNames;
use crate::host::{Attributes, ElementId, HostEditor, PageId};

/// Animation orders of every page edited this session
///
/// A page's order is created on its first edit and is never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationOrderTable {
    pages: BTreeMap<PageId, PageAnimationOrder>,
}

impl AnimationOrderTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            pages: BTreeMap::new(),
        }
    }

    /// Make `item` animate after `predecessor` on `page`.
    ///
    /// An invalid or cyclic predecessor is dropped rather than reported.
    /// The host is then asked to point `item`'s animate-after attribute at
    /// the parent's anchor, or to clear it. A rejected write is logged and
    /// the table keeps the new entry.
    ///
    /// # Returns
    /// The parent that was recorded
    pub fn add_animation<H: HostEditor + ?Sized>(
        &mut self,
        host: &mut H,
        names: &AttributeNames,
        page: &PageId,
        item: &ElementId,
        predecessor: Option<&ElementId>,
    ) -> Option<ElementId> {
        let order = self.pages.entry(page.clone()).or_default();
        let parent = order.upsert(item, predecessor);

        if predecessor.is_some() && parent.is_none() {
            debug!(
                "[ANIMATION] Dropped predecessor {:?} for {} on page {}",
                predecessor.map(ElementId::as_str),
                item,
                page
            );
        }

        let anchor = parent
            .as_ref()
            .and_then(|parent| host.block(parent))
            .and_then(|block| block.attribute_str(&names.anchor).map(str::to_string));

        debug!(
            "[ANIMATION] {} on page {} now animates after {:?}",
            item, page, anchor
        );

        write_animation_after(host, names, item, anchor.map(Value::String));

        parent
    }

    /// Remove `item` from `page`'s order.
    ///
    /// Entries that animated after `item` move up to `item`'s own parent.
    /// The host is always asked to clear `item`'s animate-after attribute,
    /// even when the page had no entry for it.
    pub fn remove_animation<H: HostEditor + ?Sized>(
        &mut self,
        host: &mut H,
        names: &AttributeNames,
        page: &PageId,
        item: &ElementId,
    ) {
        let removed = self.pages.get_mut(page).and_then(|order| order.remove(item));

        match removed {
            Some(removed) => debug!(
                "[ANIMATION] Removed {} from page {}, children moved to {:?}",
                item,
                page,
                removed.parent.as_ref().map(ElementId::as_str)
            ),
            None => debug!("[ANIMATION] {} has no entry on page {}", item, page),
        }

        write_animation_after(host, names, item, None);
    }

    /// Animation order of `page`, if it was ever edited
    pub fn page(&self, page: &PageId) -> Option<&PageAnimationOrder> {
        self.pages.get(page)
    }

    /// Iterate over all pages with an order
    pub fn iter(&self) -> impl Iterator<Item = (&PageId, &PageAnimationOrder)> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn write_animation_after<H: HostEditor + ?Sized>(
    host: &mut H,
    names: &AttributeNames,
    item: &ElementId,
    value: Option<Value>,
) {
    let mut attributes = Attributes::new();
    attributes.insert(names.animation_after.clone(), value.unwrap_or(Value::Null));

    if let Err(e) = host.update_block_attributes(item, attributes) {
        warn!("[ANIMATION] Could not sync animate-after on {}: {}", item, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Block, InMemoryHost};
    use serde_json::json;

    fn id(s: &str) -> ElementId {
        ElementId::new(s)
    }

    fn story_host() -> InMemoryHost {
        let mut host = InMemoryHost::new();
        host.insert_page(Block::new("page-1", "amp/amp-story-page")).unwrap();
        host.insert_page(Block::new("page-2", "amp/amp-story-page")).unwrap();
        for (name, anchor) in [("a", "anchor-a"), ("b", "anchor-b"), ("c", "")] {
            host.insert_element(
                &id("page-1"),
                Block::new(name, "amp/amp-story-text").with_attribute("anchor", json!(anchor)),
            )
            .unwrap();
        }
        host
    }

    fn animation_after(host: &InMemoryHost, item: &str) -> Option<String> {
        host.block(&id(item))
            .and_then(|block| block.attribute_str("ampAnimationAfter").map(str::to_string))
    }

    #[test]
    fn test_add_writes_parent_anchor() {
        let mut host = story_host();
        let names = AttributeNames::default();
        let mut table = AnimationOrderTable::new();

        table.add_animation(&mut host, &names, &id("page-1"), &id("a"), None);
        let parent = table.add_animation(&mut host, &names, &id("page-1"), &id("b"), Some(&id("a")));

        assert_eq!(parent, Some(id("a")));
        assert_eq!(animation_after(&host, "b"), Some("anchor-a".to_string()));
        assert_eq!(animation_after(&host, "a"), None);
    }

    #[test]
    fn test_parent_without_anchor_clears_attribute() {
        let mut host = story_host();
        let names = AttributeNames::default();
        let mut table = AnimationOrderTable::new();
        host.update_block_attributes(&id("a"), {
            let mut attrs = Attributes::new();
            attrs.insert("ampAnimationAfter".into(), json!("stale"));
            attrs
        })
        .unwrap();

        table.add_animation(&mut host, &names, &id("page-1"), &id("c"), None);
        table.add_animation(&mut host, &names, &id("page-1"), &id("a"), Some(&id("c")));

        assert_eq!(table.page(&id("page-1")).unwrap().parent_of(&id("a")), Some(&id("c")));
        assert_eq!(animation_after(&host, "a"), None);
    }

    #[test]
    fn test_pages_are_independent() {
        let mut host = story_host();
        let names = AttributeNames::default();
        let mut table = AnimationOrderTable::new();

        table.add_animation(&mut host, &names, &id("page-1"), &id("a"), None);
        table.add_animation(&mut host, &names, &id("page-2"), &id("b"), Some(&id("a")));

        // "a" is only on page-1, so it isn't a valid predecessor on page-2
        assert_eq!(table.page(&id("page-2")).unwrap().parent_of(&id("b")), None);
        assert_eq!(table.page(&id("page-1")).unwrap().len(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_clears_attribute_and_repairs() {
        let mut host = story_host();
        let names = AttributeNames::default();
        let mut table = AnimationOrderTable::new();
        let page = id("page-1");

        table.add_animation(&mut host, &names, &page, &id("a"), None);
        table.add_animation(&mut host, &names, &page, &id("b"), Some(&id("a")));
        table.add_animation(&mut host, &names, &page, &id("c"), Some(&id("b")));

        table.remove_animation(&mut host, &names, &page, &id("b"));

        let order = table.page(&page).unwrap();
        assert_eq!(order.parent_of(&id("c")), Some(&id("a")));
        assert!(!order.contains(&id("b")));
        assert_eq!(animation_after(&host, "b"), None);
    }

    #[test]
    fn test_rejected_write_keeps_local_state() {
        let mut host = story_host();
        let names = AttributeNames::default();
        let mut table = AnimationOrderTable::new();
        host.set_read_only(true);

        table.add_animation(&mut host, &names, &id("page-1"), &id("a"), None);
        table.add_animation(&mut host, &names, &id("page-1"), &id("b"), Some(&id("a")));

        assert_eq!(table.page(&id("page-1")).unwrap().parent_of(&id("b")), Some(&id("a")));
        assert_eq!(animation_after(&host, "b"), None);
    }
}

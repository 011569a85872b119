//! Page Animation Order
//!
//! An ordered list of animation entries for one page. Each entry names the
//! element it animates after, and the parent links always form a forest.

use serde::{Deserialize, Serialize};

use crate::host::ElementId;

/// A single element's place in the animation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationEntry {
    /// The animated element
    pub id: ElementId,
    /// Element whose animation has to finish first; `None` starts immediately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
}

impl AnimationEntry {
    pub fn new(id: impl Into<ElementId>, parent: Option<ElementId>) -> Self {
        Self {
            id: id.into(),
            parent,
        }
    }
}

/// Returns true if making `predecessor` the parent of `item` would close a
/// loop, i.e. walking up from `predecessor` reaches `item`.
///
/// The walk is bounded by the number of entries, so an order that is
/// already corrupted also reports a cycle instead of looping.
pub fn has_cycle(entries: &[AnimationEntry], item: &ElementId, predecessor: &ElementId) -> bool {
    let mut current = Some(predecessor);
    let mut steps = 0;

    while let Some(id) = current {
        if id == item {
            return true;
        }
        if steps > entries.len() {
            return true;
        }
        steps += 1;

        current = entries
            .iter()
            .find(|entry| &entry.id == id)
            .and_then(|entry| entry.parent.as_ref());
    }

    false
}

/// Animation order of a single page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageAnimationOrder {
    entries: Vec<AnimationEntry>,
}

impl PageAnimationOrder {
    /// Create an empty order
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Resolve the parent `item` would get for `predecessor`.
    ///
    /// A predecessor that isn't on the page yet, or that would create a
    /// cycle, resolves to no parent at all.
    pub fn resolve_parent(
        &self,
        item: &ElementId,
        predecessor: Option<&ElementId>,
    ) -> Option<ElementId> {
        let predecessor = predecessor?;

        if !self.contains(predecessor) || has_cycle(&self.entries, item, predecessor) {
            return None;
        }

        Some(predecessor.clone())
    }

    /// Set `item`'s parent, appending a new entry if it isn't present.
    ///
    /// The parent is resolved first, so the forest invariant holds after
    /// every call. Returns the parent that was stored.
    pub fn upsert(&mut self, item: &ElementId, predecessor: Option<&ElementId>) -> Option<ElementId> {
        let parent = self.resolve_parent(item, predecessor);

        match self.entries.iter_mut().find(|entry| &entry.id == item) {
            Some(entry) => entry.parent = parent.clone(),
            None => self.entries.push(AnimationEntry::new(item.clone(), parent.clone())),
        }

        parent
    }

    /// Remove `item` and hand its children over to its own parent
    ///
    /// # Returns
    /// The removed entry, or None if `item` had no entry
    pub fn remove(&mut self, item: &ElementId) -> Option<AnimationEntry> {
        let index = self.position(item)?;
        let removed = self.entries.remove(index);

        for entry in &mut self.entries {
            if entry.parent.as_ref() == Some(item) {
                entry.parent = removed.parent.clone();
            }
        }

        Some(removed)
    }

    /// Get an entry by element id
    pub fn get(&self, id: &ElementId) -> Option<&AnimationEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Parent of `id`, if it has an entry and a parent
    pub fn parent_of(&self, id: &ElementId) -> Option<&ElementId> {
        self.get(id).and_then(|entry| entry.parent.as_ref())
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Index of the entry for `id`
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    /// Whether no entry is its own ancestor
    pub fn is_acyclic(&self) -> bool {
        self.entries.iter().all(|entry| match &entry.parent {
            Some(parent) => !has_cycle(&self.entries, &entry.id, parent),
            None => true,
        })
    }

    pub fn entries(&self) -> &[AnimationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ElementId {
        ElementId::new(s)
    }

    fn chain_abc() -> PageAnimationOrder {
        let mut order = PageAnimationOrder::new();
        order.upsert(&id("a"), None);
        order.upsert(&id("b"), Some(&id("a")));
        order.upsert(&id("c"), Some(&id("b")));
        order
    }

    #[test]
    fn test_upsert_appends_in_order() {
        let order = chain_abc();

        assert_eq!(
            order.entries(),
            &[
                AnimationEntry::new("a", None),
                AnimationEntry::new("b", Some(id("a"))),
                AnimationEntry::new("c", Some(id("b"))),
            ]
        );
    }

    #[test]
    fn test_unknown_predecessor_resolves_to_none() {
        let mut order = PageAnimationOrder::new();
        let parent = order.upsert(&id("b"), Some(&id("a")));

        assert_eq!(parent, None);
        assert_eq!(order.get(&id("b")), Some(&AnimationEntry::new("b", None)));
        assert!(!order.contains(&id("a")));
    }

    #[test]
    fn test_self_predecessor_rejected() {
        let mut order = PageAnimationOrder::new();
        order.upsert(&id("d"), None);

        assert_eq!(order.upsert(&id("d"), Some(&id("d"))), None);
        assert_eq!(order.parent_of(&id("d")), None);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut order = chain_abc();

        // a -> c would close a <- b <- c
        assert_eq!(order.upsert(&id("a"), Some(&id("c"))), None);
        assert!(order.is_acyclic());
        assert_eq!(order.parent_of(&id("a")), None);
    }

    #[test]
    fn test_update_existing_entry_in_place() {
        let mut order = chain_abc();
        order.upsert(&id("d"), None);

        assert_eq!(order.upsert(&id("c"), Some(&id("d"))), Some(id("d")));
        assert_eq!(order.position(&id("c")), Some(2));
        assert_eq!(order.parent_of(&id("b")), Some(&id("a")));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_remove_reparents_children() {
        let mut order = chain_abc();
        order.upsert(&id("d"), Some(&id("b")));

        let removed = order.remove(&id("b"));

        assert_eq!(removed, Some(AnimationEntry::new("b", Some(id("a")))));
        assert_eq!(order.parent_of(&id("c")), Some(&id("a")));
        assert_eq!(order.parent_of(&id("d")), Some(&id("a")));
    }

    #[test]
    fn test_remove_root_keeps_grandchildren() {
        let mut order = chain_abc();
        order.remove(&id("a"));

        assert_eq!(
            order.entries(),
            &[
                AnimationEntry::new("b", None),
                AnimationEntry::new("c", Some(id("b"))),
            ]
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut order = chain_abc();
        let before = order.clone();

        assert_eq!(order.remove(&id("zzz")), None);
        assert_eq!(order, before);
    }

    #[test]
    fn test_has_cycle_on_corrupted_order_terminates() {
        let entries = vec![
            AnimationEntry::new("x", Some(id("y"))),
            AnimationEntry::new("y", Some(id("x"))),
        ];
        assert!(has_cycle(&entries, &id("z"), &id("x")));
    }
}

//! Story Store
//!
//! Combines the animation order, the current page, the page reordering
//! session and the displayed snap lines behind a single `dispatch`. Each
//! action is reduced to completion against the host it is given; nothing
//! here reports failure to the caller.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationOrderTable, PageAnimationOrder};
use crate::config::AttributeNames;
use crate::host::{ElementId, HostEditor, PageId};
use crate::pages::{BlockOrderState, CurrentPage};
use crate::snap::{SnapLine, SnapLinesState};

/// Intents the editor UI dispatches into the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Make `item` animate after `predecessor` (or immediately)
    AddAnimation {
        page: PageId,
        item: ElementId,
        #[serde(default)]
        predecessor: Option<ElementId>,
    },
    /// Drop `item` from its page's animation order
    RemoveAnimation { page: PageId, item: ElementId },
    /// Show `page` in the canvas
    SetCurrentPage { page: PageId },
    /// `page` was deleted from the document
    RemovePage { page: PageId },
    StartReordering,
    /// Move `page` to `index` in the reordering snapshot
    MovePage { page: PageId, index: usize },
    StopReordering,
    /// Discard the reordering snapshot
    ResetOrder,
    SetSnapLines { lines: Vec<SnapLine> },
    ClearSnapLines,
    ShowSnapLines,
    HideSnapLines,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddAnimation { .. } => write!(f, "ADD_ANIMATION"),
            Action::RemoveAnimation { .. } => write!(f, "REMOVE_ANIMATION"),
            Action::SetCurrentPage { .. } => write!(f, "SET_CURRENT_PAGE"),
            Action::RemovePage { .. } => write!(f, "REMOVE_PAGE"),
            Action::StartReordering => write!(f, "START_REORDERING"),
            Action::MovePage { .. } => write!(f, "MOVE_PAGE"),
            Action::StopReordering => write!(f, "STOP_REORDERING"),
            Action::ResetOrder => write!(f, "RESET_ORDER"),
            Action::SetSnapLines { .. } => write!(f, "SET_SNAP_LINES"),
            Action::ClearSnapLines => write!(f, "CLEAR_SNAP_LINES"),
            Action::ShowSnapLines => write!(f, "SHOW_SNAP_LINES"),
            Action::HideSnapLines => write!(f, "HIDE_SNAP_LINES"),
        }
    }
}

/// Editor-side state of a story
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryStore {
    #[serde(skip)]
    names: AttributeNames,
    animation_order: AnimationOrderTable,
    current_page: CurrentPage,
    blocks: BlockOrderState,
    snap_lines: SnapLinesState,
}

impl StoryStore {
    /// Create an empty store using the default attribute names
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store writing to the given attribute names
    pub fn with_attribute_names(names: AttributeNames) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// Reduce one action
    pub fn dispatch<H: HostEditor + ?Sized>(&mut self, host: &mut H, action: &Action) {
        debug!("[STORE] {}", action);

        match action {
            Action::AddAnimation {
                page,
                item,
                predecessor,
            } => {
                self.animation_order.add_animation(
                    host,
                    &self.names,
                    page,
                    item,
                    predecessor.as_ref(),
                );
            }
            Action::RemoveAnimation { page, item } => {
                self.animation_order
                    .remove_animation(host, &self.names, page, item);
            }
            Action::SetCurrentPage { page } => {
                self.current_page.select(&*host, page);
            }
            Action::RemovePage { page } => self.current_page.on_page_removed(&*host, page),
            Action::StartReordering => self.blocks.start(&*host),
            Action::MovePage { page, index } => {
                self.blocks.move_page(page, *index);
            }
            Action::StopReordering => self.blocks.stop(),
            Action::ResetOrder => self.blocks.reset(&*host),
            Action::SetSnapLines { lines } => self.snap_lines.set_lines(lines),
            Action::ClearSnapLines => self.snap_lines.clear(),
            Action::ShowSnapLines => self.snap_lines.show(),
            Action::HideSnapLines => self.snap_lines.hide(),
        }
    }

    /// Reduce a sequence of actions in order
    pub fn dispatch_all<'a, H, I>(&mut self, host: &mut H, actions: I)
    where
        H: HostEditor + ?Sized,
        I: IntoIterator<Item = &'a Action>,
    {
        for action in actions {
            self.dispatch(host, action);
        }
    }

    /// Animation order of `page`, if it was edited
    pub fn animation_order(&self, page: &PageId) -> Option<&PageAnimationOrder> {
        self.animation_order.page(page)
    }

    /// Every page's animation order
    pub fn animation_orders(&self) -> &AnimationOrderTable {
        &self.animation_order
    }

    pub fn current_page(&self) -> Option<&PageId> {
        self.current_page.get()
    }

    /// Local page order of the reordering session
    pub fn block_order(&self) -> &[PageId] {
        self.blocks.order()
    }

    pub fn is_reordering(&self) -> bool {
        self.blocks.is_reordering()
    }

    pub fn snap_lines(&self) -> &SnapLinesState {
        &self.snap_lines
    }

    pub fn attribute_names(&self) -> &AttributeNames {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_json_shape() {
        let action: Action = serde_json::from_value(json!({
            "type": "ADD_ANIMATION",
            "page": "p1",
            "item": "b"
        }))
        .unwrap();

        assert_eq!(
            action,
            Action::AddAnimation {
                page: "p1".into(),
                item: "b".into(),
                predecessor: None,
            }
        );
        assert_eq!(action.to_string(), "ADD_ANIMATION");

        let action: Action = serde_json::from_value(json!({ "type": "START_REORDERING" })).unwrap();
        assert_eq!(action, Action::StartReordering);
    }

    #[test]
    fn test_move_page_json() {
        let action = Action::MovePage {
            page: "p2".into(),
            index: 0,
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "type": "MOVE_PAGE", "page": "p2", "index": 0 })
        );
    }

    #[test]
    fn test_store_serializes_reads() {
        let store = StoryStore::new();
        let value = serde_json::to_value(&store).unwrap();

        assert_eq!(value["currentPage"], json!(null));
        assert_eq!(value["blocks"]["isReordering"], json!(false));
        assert_eq!(value["animationOrder"], json!({}));
    }
}

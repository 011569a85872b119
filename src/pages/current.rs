//! Current page selection

use log::debug;
use serde::{Deserialize, Serialize};

use crate::host::{HostEditor, PageId};

/// The page currently shown in the editor canvas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentPage(Option<PageId>);

impl CurrentPage {
    pub fn new(page: Option<PageId>) -> Self {
        Self(page)
    }

    pub fn get(&self) -> Option<&PageId> {
        self.0.as_ref()
    }

    pub fn is(&self, page: &PageId) -> bool {
        self.0.as_ref() == Some(page)
    }

    /// Switch to `page` if the host still has it as a top-level block.
    /// Elements nested in a page are not pages and are refused.
    ///
    /// # Returns
    /// Whether the selection was accepted
    pub fn select<H: HostEditor + ?Sized>(&mut self, host: &H, page: &PageId) -> bool {
        if !host.has_block(page) {
            debug!("[PAGES] Ignoring selection of missing page {}", page);
            return false;
        }
        if let Some(root) = host.block_root(page) {
            debug!("[PAGES] Ignoring selection of {}, it is an element of {}", page, root);
            return false;
        }

        debug!("[PAGES] Current page is now {}", page);
        self.0 = Some(page.clone());
        true
    }

    /// React to `page` being deleted.
    ///
    /// Only matters when `page` is the current one. The replacement is the
    /// previous page, then the next page, then the first remaining page of
    /// the canonical order, else nothing.
    pub fn on_page_removed<H: HostEditor + ?Sized>(&mut self, host: &H, page: &PageId) {
        if !self.is(page) {
            return;
        }

        let replacement = host
            .adjacent_block(page, -1)
            .or_else(|| host.adjacent_block(page, 1))
            .or_else(|| {
                host.block_order(None)
                    .into_iter()
                    .find(|candidate| candidate != page)
            });

        debug!(
            "[PAGES] Current page {} removed, falling back to {:?}",
            page,
            replacement.as_ref().map(PageId::as_str)
        );
        self.0 = replacement;
    }
}

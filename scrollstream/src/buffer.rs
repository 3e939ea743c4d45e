use scrollstream_api::{Page, ScrollId, SearchHit};

/// Holds exactly one page plus the cursor position within it.
///
/// Owned exclusively by its [`ScrollStream`](crate::ScrollStream); pulls are
/// serialized by `&mut` access, not by internal locking. Installing a new
/// page drops the previous one, so at most one page is ever buffered.
pub(crate) struct PageBuffer {
    scroll_id: ScrollId,
    hits: std::vec::IntoIter<SearchHit>,
}

impl PageBuffer {
    pub(crate) fn new(page: Page) -> Self {
        Self {
            scroll_id: page.scroll_id,
            hits: page.hits.into_iter(),
        }
    }

    /// Replace the held page and reset the cursor to its first hit.
    pub(crate) fn install(&mut self, page: Page) {
        *self = Self::new(page);
    }

    /// Advance the cursor, returning the hit it passed over.
    pub(crate) fn advance(&mut self) -> Option<SearchHit> {
        self.hits.next()
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.hits.len() == 0
    }

    /// Token for the scroll context this page came from.
    pub(crate) fn scroll_id(&self) -> &ScrollId {
        &self.scroll_id
    }
}

use crate::openlibrary::{self, BookSummary};

/// Detail-modal model. `selected` doubles as the open/closed flag; both
/// transitions are idempotent.
pub struct DetailState {
    pub(in crate::app) selected: Option<BookSummary>,
}

impl DetailState {
    pub(in crate::app) fn new() -> Self {
        DetailState { selected: None }
    }

    pub(in crate::app) fn open(&mut self, book: BookSummary) {
        self.selected = Some(book);
    }

    pub(in crate::app) fn close(&mut self) {
        self.selected = None;
    }

    /// External catalog page for the selected book; `None` while closed.
    pub(in crate::app) fn external_link(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|book| openlibrary::detail_url(&book.detail_key))
    }
}

use crate::openlibrary::BookSummary;

/// Results shown per page. The pagination strip is hidden entirely while the
/// result set fits on a single page.
pub(crate) const PAGE_SIZE: usize = 12;

/// Search-related model: the query text, the full result set of the most
/// recent completed search, and a 1-based page cursor into it.
pub struct SearchState {
    pub(in crate::app) query: String,
    pub(in crate::app) results: Vec<BookSummary>,
    pub(in crate::app) loading: bool,
    pub(in crate::app) no_results: bool,
    pub(in crate::app) current_page: usize,
    pub(in crate::app) error: Option<String>,
    /// Monotonic token for the most recently issued request. Completions
    /// carrying an older token are stale and must not touch state.
    pub(in crate::app) request_id: u64,
}

impl SearchState {
    pub(in crate::app) fn new() -> Self {
        SearchState {
            query: String::new(),
            results: Vec::new(),
            loading: false,
            no_results: false,
            current_page: 1,
            error: None,
            request_id: 0,
        }
    }

    /// Mark a new outbound request and return its token. Any request still
    /// in flight becomes stale at this point.
    pub(in crate::app) fn begin_request(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.loading = true;
        self.no_results = false;
        self.error = None;
        self.request_id
    }

    /// Replace the result set wholesale after a successful search.
    pub(in crate::app) fn commit_results(&mut self, books: Vec<BookSummary>) {
        self.no_results = books.is_empty();
        self.results = books;
        self.current_page = 1;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed search. The previous result set and page cursor stay
    /// untouched so the user keeps what they had.
    pub(in crate::app) fn commit_failure(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Restore the initial empty state. Bumps the request token so a search
    /// still in flight cannot resurrect results after the reset.
    pub(in crate::app) fn reset(&mut self) {
        self.request_id = self.request_id.wrapping_add(1);
        self.query.clear();
        self.results.clear();
        self.loading = false;
        self.no_results = false;
        self.current_page = 1;
        self.error = None;
    }

    /// Move the page cursor. Out-of-range pages and calls with no results
    /// are rejected outright rather than clamped; returns whether the cursor
    /// moved.
    pub(in crate::app) fn go_to_page(&mut self, page: usize) -> bool {
        if self.results.is_empty() || page == 0 || page > self.page_count() {
            return false;
        }
        self.current_page = page;
        true
    }

    /// The slice of results for the current page.
    pub(in crate::app) fn visible_page(&self) -> &[BookSummary] {
        let start = self.current_page.saturating_sub(1) * PAGE_SIZE;
        if start >= self.results.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(self.results.len());
        &self.results[start..end]
    }

    /// Total number of pages; zero when there are no results.
    pub(in crate::app) fn page_count(&self) -> usize {
        self.results.len().div_ceil(PAGE_SIZE)
    }
}

use iced::widget::image;
use std::collections::{HashMap, HashSet};

/// Session-lifetime cache of fetched cover images, keyed by URL. A pending
/// set dedupes in-flight fetches so paging back and forth does not re-issue
/// requests for covers already on their way.
pub struct CoverState {
    fetched: HashMap<String, image::Handle>,
    pending: HashSet<String>,
}

impl CoverState {
    pub(in crate::app) fn new() -> Self {
        CoverState {
            fetched: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    pub(in crate::app) fn handle_for(&self, url: &str) -> Option<&image::Handle> {
        self.fetched.get(url)
    }

    /// Mark a URL as in flight. Returns false when the cover is already
    /// fetched or already being fetched.
    pub(in crate::app) fn begin_fetch(&mut self, url: &str) -> bool {
        if self.fetched.contains_key(url) || self.pending.contains(url) {
            return false;
        }
        self.pending.insert(url.to_string());
        true
    }

    pub(in crate::app) fn complete(&mut self, url: String, handle: Option<image::Handle>) {
        self.pending.remove(&url);
        if let Some(handle) = handle {
            self.fetched.insert(url, handle);
        }
    }
}

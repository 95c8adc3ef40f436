use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use crate::config::ThemeMode;
use crate::openlibrary::{self, BookSummary};
use iced::widget::image;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::QueryChanged(query) => self.handle_query_changed(query),
            Message::SearchSubmitted => self.handle_search_submitted(&mut effects),
            Message::SearchReset => self.handle_search_reset(),
            Message::SearchLoaded { request_id, books } => {
                self.handle_search_loaded(request_id, books, &mut effects)
            }
            Message::SearchFailed { request_id, error } => {
                self.handle_search_failed(request_id, error)
            }
            Message::PageSelected(page) => self.handle_page_selected(page, &mut effects),
            Message::ShowDetails(book) => self.handle_show_details(book),
            Message::CloseDetails => self.detail.close(),
            Message::OpenExternalLink => self.handle_open_external_link(&mut effects),
            Message::CoverFetched { url, handle } => self.handle_cover_fetched(url, handle),
            Message::ToggleTheme => self.handle_toggle_theme(),
        }

        effects
    }

    fn handle_query_changed(&mut self, query: String) {
        self.search.query = query;
    }

    fn handle_search_submitted(&mut self, effects: &mut Vec<Effect>) {
        let request_id = self.search.begin_request();
        info!(query = %self.search.query, request_id, "Submitting search");
        effects.push(Effect::FetchSearch {
            request_id,
            query: self.search.query.clone(),
        });
    }

    fn handle_search_reset(&mut self) {
        self.search.reset();
        debug!("Search state reset");
    }

    fn handle_search_loaded(
        &mut self,
        request_id: u64,
        books: Vec<BookSummary>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.search.request_id {
            debug!(
                request_id,
                latest = self.search.request_id,
                "Discarding stale search response"
            );
            return;
        }
        info!(count = books.len(), request_id, "Search completed");
        self.search.commit_results(books);
        // The old selection belonged to the replaced result set.
        self.detail.close();
        self.request_visible_covers(effects);
    }

    fn handle_search_failed(&mut self, request_id: u64, error: String) {
        if request_id != self.search.request_id {
            debug!(
                request_id,
                latest = self.search.request_id,
                "Discarding stale search failure"
            );
            return;
        }
        warn!(request_id, "Search failed: {error}");
        self.search.commit_failure(error);
    }

    fn handle_page_selected(&mut self, page: usize, effects: &mut Vec<Effect>) {
        if self.search.go_to_page(page) {
            debug!(page, "Navigated to results page");
            self.request_visible_covers(effects);
        } else {
            debug!(
                page,
                pages = self.search.page_count(),
                "Rejected page selection"
            );
        }
    }

    fn handle_show_details(&mut self, book: BookSummary) {
        debug!(key = %book.detail_key, "Opening details");
        self.detail.open(book);
    }

    fn handle_open_external_link(&mut self, effects: &mut Vec<Effect>) {
        if let Some(url) = self.detail.external_link() {
            effects.push(Effect::OpenExternal { url });
        } else {
            debug!("Ignoring external link request with no selection");
        }
    }

    fn handle_cover_fetched(&mut self, url: String, handle: Option<image::Handle>) {
        if handle.is_none() {
            debug!(%url, "Cover fetch failed; keeping placeholder");
        }
        self.covers.complete(url, handle);
    }

    fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
    }

    /// Queue cover fetches for every card on the current page that does not
    /// have an image cached or in flight yet.
    fn request_visible_covers(&mut self, effects: &mut Vec<Effect>) {
        let style = self.config.placeholder;
        let candidates: Vec<String> = self
            .search
            .visible_page()
            .iter()
            .map(|book| openlibrary::cover_image_url(style, book.cover_id, &book.title))
            .collect();
        let urls: Vec<String> = candidates
            .into_iter()
            .filter(|url| self.covers.begin_fetch(url))
            .collect();
        if !urls.is_empty() {
            effects.push(Effect::FetchCovers { urls });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_app() -> App {
        App::bootstrap(AppConfig::default()).0
    }

    fn sample_books(tag: &str, count: usize) -> Vec<BookSummary> {
        (0..count)
            .map(|i| BookSummary {
                title: format!("{tag} {i}"),
                authors: Vec::new(),
                first_publish_year: None,
                subjects: Vec::new(),
                cover_id: None,
                detail_key: format!("/works/{tag}{i}"),
            })
            .collect()
    }

    fn submitted_request_id(effects: &[Effect]) -> u64 {
        match effects
            .iter()
            .find(|effect| matches!(effect, Effect::FetchSearch { .. }))
        {
            Some(Effect::FetchSearch { request_id, .. }) => *request_id,
            _ => panic!("expected a FetchSearch effect"),
        }
    }

    #[test]
    fn submit_issues_fetch_with_current_query() {
        let mut app = test_app();
        app.reduce(Message::QueryChanged("dune".to_string()));
        let effects = app.reduce(Message::SearchSubmitted);
        assert!(app.search.loading);
        assert!(matches!(
            &effects[..],
            [Effect::FetchSearch { query, .. }] if query == "dune"
        ));
    }

    #[test]
    fn stale_response_resolving_last_is_discarded() {
        let mut app = test_app();
        let first = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        let second = submitted_request_id(&app.reduce(Message::SearchSubmitted));

        app.reduce(Message::SearchLoaded {
            request_id: second,
            books: sample_books("b", 3),
        });
        app.reduce(Message::SearchLoaded {
            request_id: first,
            books: sample_books("a", 5),
        });

        assert_eq!(app.search.results.len(), 3);
        assert!(app.search.results[0].title.starts_with("b"));
    }

    #[test]
    fn stale_response_resolving_first_is_discarded() {
        let mut app = test_app();
        let first = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        let second = submitted_request_id(&app.reduce(Message::SearchSubmitted));

        app.reduce(Message::SearchLoaded {
            request_id: first,
            books: sample_books("a", 5),
        });
        assert!(app.search.loading, "stale response must not clear loading");
        app.reduce(Message::SearchLoaded {
            request_id: second,
            books: sample_books("b", 3),
        });

        assert_eq!(app.search.results.len(), 3);
        assert!(!app.search.loading);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut app = test_app();
        let first = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        let second = submitted_request_id(&app.reduce(Message::SearchSubmitted));

        app.reduce(Message::SearchFailed {
            request_id: first,
            error: "timed out".to_string(),
        });
        assert!(app.search.error.is_none());

        app.reduce(Message::SearchLoaded {
            request_id: second,
            books: sample_books("b", 1),
        });
        assert_eq!(app.search.results.len(), 1);
    }

    #[test]
    fn failure_preserves_previous_results_and_page() {
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 30),
        });
        app.reduce(Message::PageSelected(3));

        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchFailed {
            request_id: id,
            error: "connection refused".to_string(),
        });

        assert_eq!(app.search.results.len(), 30);
        assert_eq!(app.search.current_page, 3);
        assert!(!app.search.loading);
        assert!(!app.search.no_results);
        assert!(app.search.error.is_some());
    }

    #[test]
    fn empty_query_round_trip() {
        let mut app = test_app();
        app.reduce(Message::QueryChanged(String::new()));
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: Vec::new(),
        });

        assert!(app.search.no_results);
        assert!(app.search.results.is_empty());
        assert_eq!(app.search.current_page, 1);
    }

    #[test]
    fn commit_clears_selection_from_previous_results() {
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 2),
        });
        let book = app.search.results[0].clone();
        app.reduce(Message::ShowDetails(book));
        assert!(app.detail.selected.is_some());

        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("b", 2),
        });
        assert!(app.detail.selected.is_none());
    }

    #[test]
    fn reset_keeps_selection_open() {
        // Matches the observed behavior: reset and the modal are independent.
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 1),
        });
        let book = app.search.results[0].clone();
        app.reduce(Message::ShowDetails(book));

        app.reduce(Message::SearchReset);
        assert!(app.detail.selected.is_some());
        assert!(app.search.results.is_empty());
        assert_eq!(app.search.current_page, 1);
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchReset);
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 4),
        });

        assert!(app.search.results.is_empty());
        assert!(!app.search.loading);
    }

    #[test]
    fn external_link_requires_open_modal() {
        let mut app = test_app();
        assert!(app.reduce(Message::OpenExternalLink).is_empty());

        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 1),
        });
        let book = app.search.results[0].clone();
        app.reduce(Message::ShowDetails(book));

        let effects = app.reduce(Message::OpenExternalLink);
        assert!(matches!(
            &effects[..],
            [Effect::OpenExternal { url }] if url == "https://openlibrary.org/works/a0"
        ));
    }

    #[test]
    fn commit_requests_covers_for_first_page_only() {
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        let effects = app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 30),
        });

        match effects
            .iter()
            .find(|effect| matches!(effect, Effect::FetchCovers { .. }))
        {
            Some(Effect::FetchCovers { urls }) => assert_eq!(urls.len(), 12),
            _ => panic!("expected a FetchCovers effect"),
        }
    }

    #[test]
    fn page_change_requests_remaining_covers() {
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 13),
        });

        let effects = app.reduce(Message::PageSelected(2));
        match effects
            .iter()
            .find(|effect| matches!(effect, Effect::FetchCovers { .. }))
        {
            Some(Effect::FetchCovers { urls }) => assert_eq!(urls.len(), 1),
            _ => panic!("expected a FetchCovers effect"),
        }
    }

    #[test]
    fn rejected_page_selection_emits_no_effects() {
        let mut app = test_app();
        let id = submitted_request_id(&app.reduce(Message::SearchSubmitted));
        app.reduce(Message::SearchLoaded {
            request_id: id,
            books: sample_books("a", 5),
        });

        assert!(app.reduce(Message::PageSelected(0)).is_empty());
        assert!(app.reduce(Message::PageSelected(2)).is_empty());
        assert_eq!(app.search.current_page, 1);
    }

    #[test]
    fn theme_toggle_flips_mode() {
        let mut app = test_app();
        let before = app.config.theme;
        app.reduce(Message::ToggleTheme);
        assert_ne!(app.config.theme, before);
        app.reduce(Message::ToggleTheme);
        assert_eq!(app.config.theme, before);
    }
}

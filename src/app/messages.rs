use crate::openlibrary::BookSummary;
use iced::widget::image;

/// Messages emitted by the UI and by completed async work.
#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SearchSubmitted,
    SearchReset,
    /// A search request resolved. `request_id` identifies which outbound
    /// request this belongs to; stale completions are discarded.
    SearchLoaded {
        request_id: u64,
        books: Vec<BookSummary>,
    },
    SearchFailed {
        request_id: u64,
        error: String,
    },
    PageSelected(usize),
    ShowDetails(BookSummary),
    CloseDetails,
    OpenExternalLink,
    CoverFetched {
        url: String,
        handle: Option<image::Handle>,
    },
    ToggleTheme,
}

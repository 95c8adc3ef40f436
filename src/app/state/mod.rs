mod covers;
mod detail;
mod search;

use crate::config::AppConfig;
use iced::Task;

use super::messages::Message;

pub(in crate::app) use covers::CoverState;
pub(in crate::app) use detail::DetailState;
pub(crate) use search::PAGE_SIZE;
pub(in crate::app) use search::SearchState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) search: SearchState,
    pub(super) detail: DetailState,
    pub(super) covers: CoverState,
    pub(super) config: AppConfig,
    pub(super) http: reqwest::Client,
}

impl App {
    pub(super) fn bootstrap(config: AppConfig) -> (App, Task<Message>) {
        let app = App {
            search: SearchState::new(),
            detail: DetailState::new(),
            covers: CoverState::new(),
            config,
            http: reqwest::Client::new(),
        };
        (app, Task::none())
    }
}

mod reducer;
mod runtime;

use super::messages::Message;
use super::state::App;
use iced::keyboard::{self, key};
use iced::{Subscription, Task};

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    FetchSearch { request_id: u64, query: String },
    FetchCovers { urls: Vec<String> },
    OpenExternal { url: String },
}

impl App {
    pub fn subscription(_app: &App) -> Subscription<Message> {
        keyboard::on_key_press(|pressed, _modifiers| match pressed {
            keyboard::Key::Named(key::Named::Escape) => Some(Message::CloseDetails),
            _ => None,
        })
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}

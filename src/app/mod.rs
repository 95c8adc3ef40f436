//! UI layer for the book lookup app.
//!
//! This module owns all GUI state and messages. Search and detail state live
//! in `state`, the pure reducer and effect runtime in `update`, and the
//! widget tree in `view`.

mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::{AppConfig, ThemeMode};
use iced::{Size, Theme, window};

/// Helper to launch the app with the provided config.
pub fn run_app(config: AppConfig) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Book Lookup", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config))
}

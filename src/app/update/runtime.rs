use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use crate::openlibrary;
use anyhow::{Context, Result};
use iced::Task;
use iced::widget::image;
use std::process::Command;
use tracing::{debug, warn};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchSearch { request_id, query } => {
                let client = self.http.clone();
                Task::perform(
                    async move {
                        match openlibrary::search_books(&client, &query).await {
                            Ok(books) => Message::SearchLoaded { request_id, books },
                            Err(err) => Message::SearchFailed {
                                request_id,
                                error: format!("{err:#}"),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::FetchCovers { urls } => Task::batch(urls.into_iter().map(|url| {
                let client = self.http.clone();
                Task::perform(
                    async move {
                        let handle = match openlibrary::fetch_cover(&client, &url).await {
                            Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
                            Err(err) => {
                                debug!(%url, "Cover fetch failed: {err:#}");
                                None
                            }
                        };
                        Message::CoverFetched { url, handle }
                    },
                    |message| message,
                )
            })),
            Effect::OpenExternal { url } => {
                if let Err(err) = open_in_browser(&url) {
                    warn!(%url, "Failed to open external link: {err:#}");
                }
                Task::none()
            }
        }
    }
}

/// Hand a URL to the platform's default browser.
fn open_in_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let (program, args) = ("open", vec![url]);
    #[cfg(target_os = "windows")]
    let (program, args) = ("cmd", vec!["/C", "start", "", url]);
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let (program, args) = ("xdg-open", vec![url]);

    Command::new(program)
        .args(&args)
        .spawn()
        .with_context(|| format!("failed to launch {program}"))?;
    Ok(())
}

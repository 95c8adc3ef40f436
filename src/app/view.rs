use super::messages::Message;
use super::state::{App, PAGE_SIZE};
use crate::config::ThemeMode;
use crate::openlibrary::{self, BookSummary};
use iced::widget::{
    Column, Row, button, center, column, container, horizontal_space, image, mouse_area, opaque,
    row, scrollable, stack, text, text_input,
};
use iced::{Element, Length};

const CARDS_PER_ROW: usize = 4;
const COVER_HEIGHT: f32 = 180.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let page = column![
            self.header(),
            self.search_form(),
            self.notices(),
            self.results_grid(),
        ]
        .push_maybe(self.pagination_strip())
        .spacing(16)
        .padding(16)
        .width(Length::Fill);

        let base: Element<'_, Message> = scrollable(page).height(Length::Fill).into();

        match &self.detail.selected {
            Some(book) => modal(base, self.detail_card(book)),
            None => base,
        }
    }

    fn header(&self) -> Row<'_, Message> {
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        row![
            text("Book Lookup").size(28),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
    }

    fn search_form(&self) -> Row<'_, Message> {
        let input = text_input("Search books by keyword...", &self.search.query)
            .on_input(Message::QueryChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(8);

        let submit_label = if self.search.loading {
            "Searching..."
        } else {
            "Search"
        };
        let mut submit = button(submit_label);
        if !self.search.loading {
            submit = submit.on_press(Message::SearchSubmitted);
        }

        let reset = button("Reset")
            .on_press(Message::SearchReset)
            .style(button::secondary);

        row![input, submit, reset].spacing(8)
    }

    fn notices(&self) -> Column<'_, Message> {
        Column::new()
            .push_maybe(
                self.search
                    .error
                    .as_ref()
                    .map(|err| text(format!("Search failed: {err}")).style(text::danger)),
            )
            .push_maybe(
                self.search
                    .no_results
                    .then(|| text("No books found. Try another keyword!")),
            )
            .spacing(8)
    }

    fn results_grid(&self) -> Column<'_, Message> {
        let mut grid = Column::new().spacing(16);
        for chunk in self.search.visible_page().chunks(CARDS_PER_ROW) {
            let mut cards = Row::new().spacing(16);
            for book in chunk {
                cards = cards.push(self.result_card(book));
            }
            // Pad trailing rows so every card keeps a uniform width.
            for _ in chunk.len()..CARDS_PER_ROW {
                cards = cards.push(horizontal_space().width(Length::FillPortion(1)));
            }
            grid = grid.push(cards);
        }
        grid
    }

    fn result_card<'a>(&'a self, book: &'a BookSummary) -> Element<'a, Message> {
        let body = column![
            self.cover_image(book),
            text(format!("{} ({})", book.title, book.year_label())).size(16),
            text(book.author_label()).size(14),
            button(text("Details").size(14)).on_press(Message::ShowDetails(book.clone())),
        ]
        .spacing(8);

        container(body)
            .padding(12)
            .style(container::rounded_box)
            .width(Length::FillPortion(1))
            .into()
    }

    fn pagination_strip(&self) -> Option<Row<'_, Message>> {
        if self.search.results.len() <= PAGE_SIZE {
            return None;
        }
        let mut strip = Row::new().spacing(6);
        for page in 1..=self.search.page_count() {
            let label = text(page.to_string());
            let entry = if page == self.search.current_page {
                button(label)
            } else {
                button(label)
                    .style(button::secondary)
                    .on_press(Message::PageSelected(page))
            };
            strip = strip.push(entry);
        }
        Some(strip)
    }

    fn detail_card<'a>(&'a self, book: &'a BookSummary) -> Element<'a, Message> {
        let body = column![
            text(book.title.as_str()).size(22),
            self.cover_image(book),
            text(format!("Author: {}", book.author_label())),
            text(format!("First published: {}", book.year_label())),
            text(format!("Subjects: {}", book.subject_label())),
            row![
                button("Open catalog page").on_press(Message::OpenExternalLink),
                button("Close")
                    .on_press(Message::CloseDetails)
                    .style(button::secondary),
            ]
            .spacing(8),
        ]
        .spacing(12);

        container(body)
            .padding(20)
            .width(420.0)
            .style(container::rounded_box)
            .into()
    }

    fn cover_image<'a>(&'a self, book: &'a BookSummary) -> Element<'a, Message> {
        let url = openlibrary::cover_image_url(self.config.placeholder, book.cover_id, &book.title);
        match self.covers.handle_for(&url) {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(COVER_HEIGHT)
                .into(),
            None => container(text(""))
                .width(Length::Fill)
                .height(COVER_HEIGHT)
                .into(),
        }
    }
}

fn modal<'a>(base: Element<'a, Message>, content: Element<'a, Message>) -> Element<'a, Message> {
    stack![
        base,
        opaque(mouse_area(center(opaque(content))).on_press(Message::CloseDetails))
    ]
    .into()
}

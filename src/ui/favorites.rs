// SPDX-License-Identifier: MPL-2.0
//! Favorites screen: favorited items gathered from the root and every album.

use crate::application::query::{ApplyResult, Gathered, RequestGuard};
use crate::domain::media::MediaItem;
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::gallery::{self, Tile};
use crate::ui::{notice, styles};
use iced::widget::{button, scrollable, Column, Row, Space, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Default)]
pub struct State {
    guard: RequestGuard,
    /// Favorited items as of the last gather, in listing order.
    items: Vec<MediaItem>,
    last_error: Option<Error>,
}

impl State {
    /// Starts a new gather and returns its generation.
    pub fn begin(&mut self) -> u64 {
        self.last_error = None;
        self.guard.issue()
    }

    /// Hands back the result of the gather tagged `generation`.
    ///
    /// Failures keep the previously gathered items.
    pub fn apply(&mut self, generation: u64, result: Result<Gathered<Vec<MediaItem>>>) -> ApplyResult {
        if !self.guard.settle(generation) {
            tracing::debug!(generation, "dropping stale favorites gather");
            return ApplyResult::Stale;
        }
        match result {
            Ok(Gathered::Ready(items)) => {
                tracing::debug!(count = items.len(), "favorites gathered");
                self.items = items;
                self.last_error = None;
                ApplyResult::Applied
            }
            Ok(Gathered::NeedsAuth(auth_url)) => ApplyResult::NeedsAuth(auth_url),
            Err(error) => {
                tracing::warn!(%error, "favorites gather failed");
                self.last_error = Some(error);
                ApplyResult::Failed
            }
        }
    }

    pub fn cancel(&mut self) {
        self.guard.cancel();
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.guard.is_pending()
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    PreviewAll,
    Gallery(gallery::Message),
    /// Relative vertical scroll offset of the screen.
    Scrolled(f32),
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    OpenViewer(usize),
    ToggleFavorite(String),
    Scrolled(f32),
    Retry,
}

pub fn update(message: Message) -> Event {
    match message {
        Message::PreviewAll => Event::OpenViewer(0),
        Message::Gallery(gallery::Message::Open(index)) => Event::OpenViewer(index),
        Message::Gallery(gallery::Message::ToggleFavorite(id)) => Event::ToggleFavorite(id),
        Message::Scrolled(offset) => Event::Scrolled(offset),
        Message::Retry => Event::Retry,
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    /// Gathered items still favorited right now.
    pub tiles: Vec<Tile<'a>>,
    pub columns: usize,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    if ctx.tiles.is_empty() {
        return if ctx.state.is_loading() {
            notice::loading(ctx.i18n)
        } else if let Some(error) = ctx.state.last_error() {
            notice::error(ctx.i18n, error, Message::Retry)
        } else {
            notice::empty(ctx.i18n, "favorites-empty")
        };
    }

    let header = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(ctx.i18n.tr("favorites-title")).size(typography::TITLE_LG))
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new(ctx.i18n.tr("action-preview-all")))
                .on_press(Message::PreviewAll)
                .style(styles::button::primary),
        );

    let mut content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(header);

    if let Some(error) = ctx.state.last_error() {
        content = content.push(notice::banner(ctx.i18n, error, Message::Retry));
    }

    content = content.push(gallery::view(ctx.tiles, ctx.columns, ctx.i18n).map(Message::Gallery));

    scrollable(content)
        .height(Length::Fill)
        .on_scroll(|viewport| Message::Scrolled(viewport.relative_offset().y))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> MediaItem {
        MediaItem::new(id, format!("{id}.jpg"), "image/jpeg").unwrap()
    }

    #[test]
    fn newest_gather_wins() {
        let mut state = State::default();
        let old = state.begin();
        let new = state.begin();

        assert_eq!(
            state.apply(old, Ok(Gathered::Ready(vec![item("old")]))),
            ApplyResult::Stale
        );
        assert_eq!(
            state.apply(new, Ok(Gathered::Ready(vec![item("new")]))),
            ApplyResult::Applied
        );
        assert_eq!(state.items()[0].id, "new");
        assert!(!state.is_loading());
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut state = State::default();
        let first = state.begin();
        state.apply(first, Ok(Gathered::Ready(vec![item("a")])));

        let second = state.begin();
        let outcome = state.apply(second, Err(Error::Network("refused".into())));

        assert_eq!(outcome, ApplyResult::Failed);
        assert_eq!(state.items().len(), 1);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn auth_leaves_items_untouched() {
        let mut state = State::default();
        let generation = state.begin();
        let outcome = state.apply(
            generation,
            Ok(Gathered::NeedsAuth("http://localhost:8000/auth/start".into())),
        );
        assert_eq!(
            outcome,
            ApplyResult::NeedsAuth("http://localhost:8000/auth/start".into())
        );
        assert!(state.items().is_empty());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn preview_all_opens_the_viewer_on_the_first_item() {
        assert_eq!(update(Message::PreviewAll), Event::OpenViewer(0));
        assert_eq!(
            update(Message::Gallery(gallery::Message::Open(3))),
            Event::OpenViewer(3)
        );
    }

    #[test]
    fn cancelled_gather_is_ignored() {
        let mut state = State::default();
        let generation = state.begin();
        state.cancel();
        assert_eq!(
            state.apply(generation, Ok(Gathered::Ready(vec![item("a")]))),
            ApplyResult::Stale
        );
    }
}

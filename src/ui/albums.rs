// SPDX-License-Identifier: MPL-2.0
//! Albums screen: root folders as cover cards, and the photos of an opened
//! folder.

use crate::application::query::{AlbumCover, FolderNavigator, RequestGuard};
use crate::domain::media::{FolderRef, MediaItem};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::gallery::{self, Tile};
use crate::ui::{notice, styles};
use iced::widget::image::Handle;
use iced::widget::{button, scrollable, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct State {
    pub navigator: FolderNavigator,
    covers: HashMap<String, Option<MediaItem>>,
    covers_guard: RequestGuard,
}

impl State {
    /// Folders among `folders` whose cover has not been resolved yet.
    #[must_use]
    pub fn missing_covers(&self, folders: &[FolderRef]) -> Vec<FolderRef> {
        folders
            .iter()
            .filter(|folder| !self.covers.contains_key(&folder.id))
            .cloned()
            .collect()
    }

    /// Returns the generation for a new cover load. Known covers are kept.
    pub fn begin_covers(&mut self) -> u64 {
        self.covers_guard.issue()
    }

    /// Adds covers from the load tagged `generation` to the known ones.
    ///
    /// Returns `false` when a newer load superseded it.
    pub fn apply_covers(&mut self, generation: u64, covers: Vec<AlbumCover>) -> bool {
        if !self.covers_guard.settle(generation) {
            tracing::debug!(generation, "dropping stale album covers");
            return false;
        }
        self.covers.extend(covers);
        true
    }

    /// `None` while unknown, `Some(None)` for an album without items.
    #[must_use]
    pub fn cover(&self, folder_id: &str) -> Option<Option<&MediaItem>> {
        self.covers.get(folder_id).map(Option::as_ref)
    }

    /// Resolved covers of the current root albums, in folder order.
    #[must_use]
    pub fn cover_items(&self) -> Vec<&MediaItem> {
        self.navigator
            .current_folders()
            .iter()
            .filter_map(|folder| self.covers.get(&folder.id)?.as_ref())
            .collect()
    }

    #[must_use]
    pub fn covers_loading(&self) -> bool {
        self.covers_guard.is_pending()
    }

    /// Abandons the listing and cover requests in flight.
    pub fn cancel(&mut self) {
        self.navigator.cancel();
        self.covers_guard.cancel();
    }

    /// Items of the opened folder; empty at the root.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        if self.navigator.is_at_root() {
            &[]
        } else {
            self.navigator.current_items()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenAlbum(FolderRef),
    Back,
    PreviewAll,
    Gallery(gallery::Message),
    /// Relative vertical scroll offset of the screen.
    Scrolled(f32),
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EnterFolder(FolderRef),
    ReturnToRoot,
    OpenViewer(usize),
    ToggleFavorite(String),
    Scrolled(f32),
    Retry,
}

pub fn update(message: Message) -> Event {
    match message {
        Message::OpenAlbum(folder) => Event::EnterFolder(folder),
        Message::Back => Event::ReturnToRoot,
        Message::PreviewAll => Event::OpenViewer(0),
        Message::Gallery(gallery::Message::Open(index)) => Event::OpenViewer(index),
        Message::Gallery(gallery::Message::ToggleFavorite(id)) => Event::ToggleFavorite(id),
        Message::Scrolled(offset) => Event::Scrolled(offset),
        Message::Retry => Event::Retry,
    }
}

/// A folder card with its resolved cover.
#[derive(Debug, Clone)]
pub struct AlbumCard<'a> {
    pub folder: &'a FolderRef,
    pub cover: Option<Handle>,
    /// The cover is still being resolved or downloaded.
    pub pending: bool,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub albums: Vec<AlbumCard<'a>>,
    pub tiles: Vec<Tile<'a>>,
    pub columns: usize,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let navigator = &ctx.state.navigator;
    let at_root = navigator.is_at_root();
    let has_content = !ctx.albums.is_empty() || !ctx.tiles.is_empty();

    if !has_content && at_root {
        return if navigator.is_loading() {
            notice::loading(ctx.i18n)
        } else if let Some(error) = navigator.last_error() {
            notice::error(ctx.i18n, error, Message::Retry)
        } else {
            notice::empty(ctx.i18n, "albums-empty")
        };
    }

    let mut header = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center);
    if !at_root {
        header = header.push(
            button(Text::new(ctx.i18n.tr("albums-back")))
                .on_press(Message::Back)
                .style(styles::button::unselected),
        );
    }
    let title = navigator
        .current_folder_name()
        .map_or_else(|| ctx.i18n.tr("albums-title"), str::to_string);
    header = header.push(Text::new(title).size(typography::TITLE_LG));
    if navigator.is_loading() {
        header = header.push(Text::new(ctx.i18n.tr("status-loading")).size(typography::BODY_SM));
    }
    if !ctx.tiles.is_empty() {
        header = header.push(Space::new().width(Length::Fill)).push(
            button(Text::new(ctx.i18n.tr("action-preview-all")))
                .on_press(Message::PreviewAll)
                .style(styles::button::primary),
        );
    }

    let mut content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(header);

    if let Some(error) = navigator.last_error() {
        content = content.push(notice::banner(ctx.i18n, error, Message::Retry));
    }

    if !ctx.albums.is_empty() {
        content = content.push(view_album_grid(ctx.albums, ctx.columns, ctx.i18n));
    }

    if !ctx.tiles.is_empty() {
        content = content.push(
            gallery::view(ctx.tiles, ctx.columns, ctx.i18n).map(Message::Gallery),
        );
    } else if !at_root && !navigator.is_loading() && navigator.last_error().is_none() {
        content = content.push(Text::new(ctx.i18n.tr("albums-folder-empty")));
    }

    scrollable(content)
        .height(Length::Fill)
        .on_scroll(|viewport| Message::Scrolled(viewport.relative_offset().y))
        .into()
}

fn view_album_grid<'a>(
    albums: Vec<AlbumCard<'a>>,
    columns: usize,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let columns = columns.max(1);
    let mut grid = Column::new().spacing(spacing::MD);
    let mut cards = albums.into_iter().peekable();

    while cards.peek().is_some() {
        let mut row = Row::new().spacing(spacing::MD);
        let mut filled = 0;
        for card in cards.by_ref().take(columns) {
            row = row.push(view_album_card(card, i18n));
            filled += 1;
        }
        for _ in filled..columns {
            row = row.push(Space::new().width(Length::FillPortion(1)));
        }
        grid = grid.push(row);
    }

    grid.into()
}

fn view_album_card<'a>(card: AlbumCard<'a>, i18n: &'a I18n) -> Element<'a, Message> {
    let cover: Element<'a, Message> = if card.cover.is_some() || card.pending {
        gallery::thumbnail_or_placeholder(
            card.cover,
            sizing::ALBUM_COVER_HEIGHT,
            i18n.tr("status-loading"),
        )
    } else {
        Container::new(Text::new(i18n.tr("albums-no-cover")).size(typography::CAPTION))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::ALBUM_COVER_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::placeholder)
            .into()
    };

    let body = Column::new()
        .spacing(spacing::XXS)
        .push(cover)
        .push(Text::new(card.folder.name.clone()).size(typography::BODY));

    button(body)
        .on_press(Message::OpenAlbum(card.folder.clone()))
        .padding(spacing::XXS)
        .width(Length::FillPortion(1))
        .style(styles::button::tile)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> MediaItem {
        MediaItem::new(id, format!("{id}.jpg"), "image/jpeg").unwrap()
    }

    #[test]
    fn covers_from_stale_load_are_dropped() {
        let mut state = State::default();
        let first = state.begin_covers();
        let second = state.begin_covers();

        assert!(!state.apply_covers(first, vec![("f1".into(), Some(item("a")))]));
        assert_eq!(state.cover("f1"), None);

        assert!(state.apply_covers(second, vec![("f1".into(), Some(item("b")))]));
        assert_eq!(state.cover("f1").flatten().map(|i| i.id.as_str()), Some("b"));
    }

    #[test]
    fn known_covers_survive_a_new_load() {
        let mut state = State::default();
        let folders = vec![FolderRef::new("f1", "Trip"), FolderRef::new("f2", "Home")];
        assert_eq!(state.missing_covers(&folders), folders);

        let first = state.begin_covers();
        assert!(state.apply_covers(first, vec![("f1".into(), Some(item("a")))]));
        assert_eq!(state.missing_covers(&folders), vec![FolderRef::new("f2", "Home")]);

        let second = state.begin_covers();
        assert_eq!(state.cover("f1").flatten().map(|i| i.id.as_str()), Some("a"));
        assert!(state.apply_covers(second, vec![("f2".into(), None)]));

        assert_eq!(state.cover("f1").flatten().map(|i| i.id.as_str()), Some("a"));
        assert_eq!(state.cover("f2"), Some(None));
        assert!(state.missing_covers(&folders).is_empty());
    }

    #[test]
    fn cover_items_follow_folder_order() {
        use crate::application::port::ListingOutcome;
        use crate::domain::media::Listing;

        let mut state = State::default();
        let ticket = state.navigator.return_to_root();
        let folders = vec![
            FolderRef::new("f1", "Trip"),
            FolderRef::new("f2", "Empty"),
            FolderRef::new("f3", "Home"),
        ];
        let listing = ListingOutcome::Listing(Listing::new(None, folders, Vec::new()));
        assert_eq!(
            state.navigator.apply(ticket, Ok(listing)),
            crate::application::query::ApplyResult::Applied
        );

        let generation = state.begin_covers();
        state.apply_covers(
            generation,
            vec![
                ("f3".into(), Some(item("c"))),
                ("f2".into(), None),
                ("f1".into(), Some(item("a"))),
            ],
        );

        let ids: Vec<&str> = state.cover_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn empty_album_is_distinguished_from_unknown() {
        let mut state = State::default();
        let generation = state.begin_covers();
        state.apply_covers(generation, vec![("empty".into(), None)]);

        assert_eq!(state.cover("empty"), Some(None));
        assert_eq!(state.cover("unknown"), None);
    }

    #[test]
    fn cancel_invalidates_pending_covers() {
        let mut state = State::default();
        let generation = state.begin_covers();
        assert!(state.covers_loading());
        state.cancel();
        assert!(!state.apply_covers(generation, Vec::new()));
    }

    #[test]
    fn preview_all_opens_the_viewer_on_the_first_item() {
        assert_eq!(update(Message::PreviewAll), Event::OpenViewer(0));
    }

    #[test]
    fn scroll_offset_is_forwarded() {
        assert_eq!(update(Message::Scrolled(0.5)), Event::Scrolled(0.5));
    }

    #[test]
    fn back_returns_to_root() {
        assert_eq!(update(Message::Back), Event::ReturnToRoot);
        let folder = FolderRef::new("f1", "Trip");
        assert_eq!(
            update(Message::OpenAlbum(folder.clone())),
            Event::EnterFolder(folder)
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Update handlers for the application root.
//!
//! Component events are turned into navigator/cursor transitions here, and
//! every background request is started from here.

use super::{App, Message, Screen, THUMBNAIL_WINDOW};
use crate::application::port::{ListingOutcome, ListingSource};
use crate::application::query::{
    gather_favorites, load_album_covers, AlbumCover, ApplyResult, Gathered, RequestTicket,
};
use crate::domain::media::{FolderRef, MediaItem};
use crate::error::Result;
use crate::media::prefetch::{load_rendition, prefetch_targets, preview_requests};
use crate::media::Rendition;
use crate::ui::notifications::Notification;
use crate::ui::{albums, favorites, gallery, home, lightbox, navbar, notice};
use iced::Task;
use std::path::PathBuf;

/// Thumbnail width used for the Home hero image.
pub(super) const HERO_WIDTH: u32 = 1600;

impl App {
    pub(super) fn handle_navbar_message(&mut self, message: navbar::Message) -> Task<Message> {
        match navbar::update(message, self.screen) {
            navbar::Event::None => Task::none(),
            navbar::Event::SwitchTo(screen) => self.switch_screen(screen),
            navbar::Event::Refresh => self.refresh_screen(),
        }
    }

    pub(super) fn handle_home_message(&mut self, message: home::Message) -> Task<Message> {
        match home::update(message) {
            home::Event::OpenViewer(index) => {
                let items = self.home.items().to_vec();
                self.open_viewer(items, index)
            }
            home::Event::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
                Task::none()
            }
            home::Event::Scrolled(offset) => self.on_scrolled(Screen::Home, offset),
            home::Event::Retry => self.refresh_screen(),
        }
    }

    pub(super) fn handle_albums_message(&mut self, message: albums::Message) -> Task<Message> {
        match albums::update(message) {
            albums::Event::EnterFolder(FolderRef { id, name }) => {
                self.albums.cancel();
                let ticket = self.albums.navigator.enter_folder(id, name);
                self.fetch_listing(Screen::Albums, ticket)
            }
            albums::Event::ReturnToRoot => {
                self.albums.cancel();
                let ticket = self.albums.navigator.return_to_root();
                self.fetch_listing(Screen::Albums, ticket)
            }
            albums::Event::OpenViewer(index) => {
                let items = self.albums.items().to_vec();
                self.open_viewer(items, index)
            }
            albums::Event::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
                Task::none()
            }
            albums::Event::Scrolled(offset) => self.on_scrolled(Screen::Albums, offset),
            albums::Event::Retry => self.refresh_screen(),
        }
    }

    pub(super) fn handle_favorites_message(
        &mut self,
        message: favorites::Message,
    ) -> Task<Message> {
        match favorites::update(message) {
            favorites::Event::OpenViewer(index) => {
                let items = self.favorite_items();
                self.open_viewer(items, index)
            }
            favorites::Event::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
                Task::none()
            }
            favorites::Event::Scrolled(offset) => self.on_scrolled(Screen::Favorites, offset),
            favorites::Event::Retry => self.gather_favorites(),
        }
    }

    pub(super) fn handle_lightbox_message(&mut self, message: lightbox::Message) -> Task<Message> {
        match message {
            lightbox::Message::Next => {
                if self.cursor.next().is_some() {
                    self.on_cursor_changed()
                } else {
                    Task::none()
                }
            }
            lightbox::Message::Previous => {
                if self.cursor.previous().is_some() {
                    self.on_cursor_changed()
                } else {
                    Task::none()
                }
            }
            lightbox::Message::Close => {
                self.close_viewer();
                Task::none()
            }
            lightbox::Message::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
                Task::none()
            }
            lightbox::Message::OpenOriginal => {
                let url = match (&self.client, self.cursor.current()) {
                    (Ok(client), Some(item)) => Some(client.urls().original(item)),
                    _ => None,
                };
                if let Some(url) = url {
                    self.open_in_browser(&url);
                }
                Task::none()
            }
            lightbox::Message::Download => self.choose_download_target(),
        }
    }

    /// Hands a listing response to the navigator that requested it.
    pub(super) fn handle_listing_loaded(
        &mut self,
        screen: Screen,
        ticket: RequestTicket,
        result: Result<ListingOutcome>,
    ) -> Task<Message> {
        let at_root = ticket.parent_id().is_none();
        let navigator = match screen {
            Screen::Home => &mut self.home.navigator,
            Screen::Albums => &mut self.albums.navigator,
            // Favorites are gathered, never listed.
            Screen::Favorites => return Task::none(),
        };

        match navigator.apply(ticket, result) {
            ApplyResult::Applied => {}
            ApplyResult::Stale | ApplyResult::Failed => return Task::none(),
            ApplyResult::NeedsAuth(auth_url) => {
                self.require_auth(auth_url);
                return Task::none();
            }
        }

        let mut tasks = Vec::new();

        if self.cursor.is_open() && screen == self.screen {
            let items = match screen {
                Screen::Home => self.home.items().to_vec(),
                Screen::Albums => self.albums.items().to_vec(),
                Screen::Favorites => Vec::new(),
            };
            self.cursor.replace_items(items);
            if self.cursor.is_open() {
                tasks.push(self.on_cursor_changed());
            } else {
                self.lightbox.clear();
            }
        }

        if screen == Screen::Albums && at_root {
            tasks.push(self.load_covers());
        } else {
            tasks.push(self.request_visible_thumbnails(screen, self.grid_offset));
        }

        Task::batch(tasks)
    }

    pub(super) fn handle_favorites_gathered(
        &mut self,
        generation: u64,
        result: Result<Gathered<Vec<MediaItem>>>,
    ) -> Task<Message> {
        match self.favorites_view.apply(generation, result) {
            ApplyResult::Applied => {
                self.request_visible_thumbnails(Screen::Favorites, self.grid_offset)
            }
            ApplyResult::NeedsAuth(auth_url) => {
                self.require_auth(auth_url);
                Task::none()
            }
            ApplyResult::Stale | ApplyResult::Failed => Task::none(),
        }
    }

    pub(super) fn handle_covers_loaded(
        &mut self,
        generation: u64,
        covers: Gathered<Vec<AlbumCover>>,
    ) -> Task<Message> {
        match covers {
            Gathered::Ready(covers) => {
                if self.albums.apply_covers(generation, covers) {
                    self.request_visible_thumbnails(Screen::Albums, self.grid_offset)
                } else {
                    Task::none()
                }
            }
            Gathered::NeedsAuth(auth_url) => {
                if self.albums.apply_covers(generation, Vec::new()) {
                    self.require_auth(auth_url);
                }
                Task::none()
            }
        }
    }

    pub(super) fn handle_thumbnail_loaded(&mut self, url: String, result: Result<Rendition>) {
        match result {
            Ok(rendition) => {
                self.thumbnails.insert(url, rendition);
            }
            Err(error) => {
                tracing::debug!(%url, %error, "thumbnail failed");
                self.thumbnails.abandon(&url);
            }
        }
    }

    pub(super) fn handle_preview_loaded(&mut self, url: String, result: Result<Rendition>) {
        match result {
            Ok(rendition) => {
                if self.lightbox.wants(&url) {
                    self.lightbox.show(rendition.handle.clone());
                }
                self.previews.insert(url, rendition);
            }
            Err(error) => {
                self.previews.abandon(&url);
                if self.lightbox.wants(&url) {
                    tracing::warn!(%url, %error, "preview failed");
                    self.lightbox.fail();
                } else {
                    tracing::debug!(%url, %error, "prefetch failed");
                }
            }
        }
    }

    pub(super) fn handle_download_target(
        &mut self,
        item: MediaItem,
        path: Option<PathBuf>,
    ) -> Task<Message> {
        let Some(path) = path else {
            tracing::debug!(id = %item.id, "download cancelled");
            return Task::none();
        };
        let client = match self.client.clone() {
            Ok(client) => client,
            Err(error) => {
                self.handle_download_finished(item.name, Err(error));
                return Task::none();
            }
        };

        self.downloading = true;
        let url = client.urls().download(&item.id);
        let name = item.name;
        Task::perform(
            async move { client.download_to(url, &path).await },
            move |result| Message::DownloadFinished {
                name: name.clone(),
                result,
            },
        )
    }

    pub(super) fn handle_download_finished(&mut self, name: String, result: Result<u64>) {
        self.downloading = false;
        let notification = match result {
            Ok(bytes) => {
                tracing::debug!(%name, bytes, "download saved");
                Notification::success("notification-download-success").with_arg("name", name)
            }
            Err(error) => Notification::error("notification-download-error")
                .with_arg("name", name)
                .with_arg("error", notice::describe(&self.i18n, &error)),
        };
        self.notifications.push(notification);
    }

    /// Opens `url` in the system browser, reporting failures as a toast.
    pub(super) fn open_in_browser(&mut self, url: &str) {
        if let Err(error) = webbrowser::open(url) {
            tracing::warn!(%url, %error, "could not open browser");
            self.notifications
                .push(Notification::error("notification-open-browser-error"));
        }
    }

    /// Requests the listing for `ticket` on behalf of `screen`.
    pub(super) fn fetch_listing(&self, screen: Screen, ticket: RequestTicket) -> Task<Message> {
        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(error) => {
                return Task::done(Message::ListingLoaded {
                    screen,
                    ticket,
                    result: Err(error.clone()),
                })
            }
        };
        let parent_id = ticket.parent_id().map(str::to_owned);
        Task::perform(
            async move { client.children(parent_id.as_deref()).await },
            move |result| Message::ListingLoaded {
                screen,
                ticket: ticket.clone(),
                result,
            },
        )
    }

    /// Starts the initial load for `screen`.
    pub(super) fn load_screen(&mut self, screen: Screen) -> Task<Message> {
        match screen {
            Screen::Home => {
                let ticket = self.home.navigator.return_to_root();
                self.fetch_listing(Screen::Home, ticket)
            }
            Screen::Albums => {
                let ticket = self.albums.navigator.refresh();
                self.fetch_listing(Screen::Albums, ticket)
            }
            Screen::Favorites => self.gather_favorites(),
        }
    }

    fn switch_screen(&mut self, screen: Screen) -> Task<Message> {
        tracing::debug!(from = ?self.screen, to = ?screen, "switching screen");
        match self.screen {
            Screen::Home => self.home.navigator.cancel(),
            Screen::Albums => self.albums.cancel(),
            Screen::Favorites => self.favorites_view.cancel(),
        }
        self.close_viewer();
        self.auth_url = None;
        self.screen = screen;
        self.grid_offset = 0.0;

        match screen {
            Screen::Home => self.load_screen(Screen::Home),
            Screen::Albums => {
                let ticket = self.albums.navigator.return_to_root();
                self.fetch_listing(Screen::Albums, ticket)
            }
            Screen::Favorites => self.gather_favorites(),
        }
    }

    fn refresh_screen(&mut self) -> Task<Message> {
        match self.screen {
            Screen::Home => {
                let ticket = self.home.navigator.refresh();
                self.fetch_listing(Screen::Home, ticket)
            }
            Screen::Albums => {
                let ticket = self.albums.navigator.refresh();
                self.fetch_listing(Screen::Albums, ticket)
            }
            Screen::Favorites => self.gather_favorites(),
        }
    }

    fn gather_favorites(&mut self) -> Task<Message> {
        let generation = self.favorites_view.begin();
        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(error) => {
                return Task::done(Message::FavoritesGathered {
                    generation,
                    result: Err(error.clone()),
                })
            }
        };
        let ids = self.favorites.id_set();
        Task::perform(
            async move { gather_favorites(&client, &ids).await },
            move |result| Message::FavoritesGathered { generation, result },
        )
    }

    /// Resolves covers of root albums not seen before, and loads the
    /// thumbnails of the covers already known.
    fn load_covers(&mut self) -> Task<Message> {
        let thumbnails = self.request_visible_thumbnails(Screen::Albums, self.grid_offset);
        let missing = self
            .albums
            .missing_covers(self.albums.navigator.current_folders());
        if missing.is_empty() {
            return thumbnails;
        }
        let Ok(client) = self.client.clone() else {
            return thumbnails;
        };
        tracing::debug!(count = missing.len(), "resolving album covers");
        let generation = self.albums.begin_covers();
        Task::batch([
            thumbnails,
            Task::perform(
                async move { load_album_covers(&client, &missing).await },
                move |covers| Message::CoversLoaded { generation, covers },
            ),
        ])
    }

    fn on_scrolled(&mut self, screen: Screen, offset: f32) -> Task<Message> {
        self.grid_offset = offset;
        self.request_visible_thumbnails(screen, offset)
    }

    /// Fetches missing thumbnails for the tiles of `screen` around the scroll
    /// `offset`. Home also gets its hero image.
    fn request_visible_thumbnails(&mut self, screen: Screen, offset: f32) -> Task<Message> {
        let width = self.display.thumbnail_width();
        let urls = match screen {
            Screen::Home => {
                let Some((hero, rest)) = self.home.items().split_first() else {
                    return Task::none();
                };
                let mut urls: Vec<String> =
                    self.thumbnail_url(hero, HERO_WIDTH).into_iter().collect();
                urls.extend(self.visible_thumbnail_urls(rest.iter(), offset, width));
                urls
            }
            Screen::Albums if self.albums.navigator.is_at_root() => {
                self.visible_thumbnail_urls(self.albums.cover_items().into_iter(), offset, width)
            }
            Screen::Albums => self.visible_thumbnail_urls(self.albums.items().iter(), offset, width),
            Screen::Favorites => {
                let items = self.favorite_items();
                self.visible_thumbnail_urls(items.iter(), offset, width)
            }
        };
        let claimed = self.thumbnails.claim_for_prefetch(&urls);
        self.spawn_loads(claimed, |url, result| Message::ThumbnailLoaded { url, result })
    }

    /// Thumbnail URLs of the window of `items` around `offset`, skipping videos.
    fn visible_thumbnail_urls<'a>(
        &self,
        items: impl ExactSizeIterator<Item = &'a MediaItem>,
        offset: f32,
        width: u32,
    ) -> Vec<String> {
        let visible = gallery::thumbnail_window(items.len(), offset, THUMBNAIL_WINDOW);
        items
            .skip(visible.start)
            .take(visible.len())
            .filter_map(|item| self.thumbnail_url(item, width))
            .collect()
    }

    pub(super) fn thumbnail_url(&self, item: &MediaItem, width: u32) -> Option<String> {
        if item.is_video() {
            return None;
        }
        let client = self.client.as_ref().ok()?;
        Some(client.urls().thumbnail(&item.id, width).into())
    }

    pub(super) fn preview_url(&self, item: &MediaItem) -> Option<String> {
        if item.is_video() {
            return None;
        }
        let client = self.client.as_ref().ok()?;
        Some(
            client
                .urls()
                .preview(&item.id, self.display.preview_width())
                .into(),
        )
    }

    fn spawn_loads(
        &self,
        urls: Vec<String>,
        to_message: fn(String, Result<Rendition>) -> Message,
    ) -> Task<Message> {
        let Ok(client) = &self.client else {
            return Task::none();
        };
        Task::batch(urls.into_iter().map(|url| {
            let client = client.clone();
            Task::perform(load_rendition(client, url), move |(url, result)| {
                to_message(url, result)
            })
        }))
    }

    fn open_viewer(&mut self, items: Vec<MediaItem>, index: usize) -> Task<Message> {
        if !self.cursor.open(items, index) {
            return Task::none();
        }
        self.lightbox.clear();
        self.on_cursor_changed()
    }

    fn close_viewer(&mut self) {
        if self.cursor.is_open() {
            let stats = self.previews.stats();
            tracing::debug!(
                hits = stats.hits,
                misses = stats.misses,
                hit_rate = stats.hit_rate(),
                evictions = stats.evictions,
                cached = stats.entry_count,
                bytes = self.previews.memory_usage(),
                "viewer closed"
            );
        }
        self.cursor.close();
        self.lightbox.clear();
    }

    /// Focuses the lightbox on the cursor's item and prefetches its neighbors.
    fn on_cursor_changed(&mut self) -> Task<Message> {
        let Some(current) = self.cursor.current().cloned() else {
            self.lightbox.clear();
            return Task::none();
        };

        let focused = self.preview_url(&current);
        match &focused {
            Some(url) => {
                self.lightbox.focus(url.clone());
                if let Some(rendition) = self.previews.get(url) {
                    self.lightbox.show(rendition.handle);
                }
            }
            None => {
                // Videos have no server-side preview.
                let key = self
                    .client
                    .as_ref()
                    .map(|client| client.urls().content(&current.id).to_string())
                    .unwrap_or_else(|_| current.id.clone());
                self.lightbox.focus(key);
                self.lightbox.fail();
            }
        }

        let targets = prefetch_targets(&self.cursor, |item| self.preview_url(item));
        let requests = preview_requests(&mut self.previews, focused.as_deref(), &targets);
        if !requests.is_empty() {
            tracing::debug!(count = requests.len(), "requesting previews");
        }
        self.spawn_loads(requests, |url, result| Message::PreviewLoaded { url, result })
    }

    fn toggle_favorite(&mut self, id: &str) {
        let now_favorite = self.favorites.toggle_favorite(id);
        tracing::debug!(%id, now_favorite, "favorite toggled");
        if self.favorites.last_write_failed() {
            self.notifications
                .dismiss_matching("notification-favorites-save-error");
            self.notifications
                .push(Notification::warning("notification-favorites-save-error"));
        }
    }

    /// Shows the sign-in notice. The browser is opened automatically the first
    /// time a screen is blocked.
    fn require_auth(&mut self, auth_url: String) {
        self.close_viewer();
        let first_time = self.auth_url.is_none();
        self.auth_url = Some(auth_url.clone());
        if first_time {
            self.open_in_browser(&auth_url);
        }
    }

    fn choose_download_target(&mut self) -> Task<Message> {
        if self.downloading {
            return Task::none();
        }
        let Some(item) = self.cursor.current().cloned() else {
            return Task::none();
        };
        let file_name = item.name.clone();
        Task::perform(
            async move {
                let dialog = rfd::AsyncFileDialog::new().set_file_name(&file_name);
                dialog
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            move |path| Message::DownloadTargetChosen {
                item: item.clone(),
                path,
            },
        )
    }

    /// Favorites in the order they were gathered, minus those since removed.
    pub(super) fn favorite_items(&self) -> Vec<MediaItem> {
        self.favorites.filter_favorites(self.favorites_view.items())
    }
}

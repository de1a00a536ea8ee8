// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between screens, the lightbox
//! and background requests.
//!
//! The `App` owns the one favorites store, the viewer cursor, the rendition
//! caches and a navigator per screen. Components only emit events; every
//! network request is started here and its completion comes back as a
//! [`Message`].

pub mod config;
mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::application::port::KeyValueStore;
use crate::application::query::MediaCursor;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::i18n::fluent::I18n;
use crate::infrastructure::{FileStore, HttpClient, MemoryStore};
use crate::media::{PrefetchConfig, RenditionCache};
use crate::ui::{albums, favorites, home, lightbox, notifications};
use config::DisplayConfig;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Upper bound on decoded thumbnails kept for the grids.
pub const THUMBNAIL_CACHE_BYTES: usize = 96 * 1024 * 1024;

/// Upper bound on thumbnails kept.
pub const THUMBNAIL_CACHE_ENTRIES: usize = 512;

/// Grid thumbnails requested at once around the scroll position.
pub const THUMBNAIL_WINDOW: usize = THUMBNAIL_CACHE_ENTRIES / 2;

// A window plus the Home hero must fit in the cache.
const _: () = assert!(THUMBNAIL_WINDOW + 1 < THUMBNAIL_CACHE_ENTRIES);

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    theme: Theme,
    /// `Err` when the configured server URL is unusable; every request then
    /// fails with that error.
    client: Result<HttpClient>,
    display: DisplayConfig,
    home: home::State,
    albums: albums::State,
    favorites_view: favorites::State,
    favorites: FavoritesStore<Box<dyn KeyValueStore>>,
    cursor: MediaCursor,
    lightbox: lightbox::State,
    /// Lightbox previews, filled by prefetch.
    previews: RenditionCache,
    thumbnails: RenditionCache,
    /// Last relative scroll offset of the current screen's grid.
    grid_offset: f32,
    /// Sign-in URL while the listing service requires authentication.
    auth_url: Option<String>,
    notifications: notifications::Manager,
    downloading: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("viewer_open", &self.cursor.is_open())
            .field("favorites", &self.favorites.len())
            .field("needs_auth", &self.auth_url.is_some())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

fn thumbnail_cache_config() -> PrefetchConfig {
    PrefetchConfig {
        max_bytes: THUMBNAIL_CACHE_BYTES,
        max_entries: THUMBNAIL_CACHE_ENTRIES,
        enabled: true,
    }
}

impl App {
    /// Loads config and favorites, then requests the first screen's listing.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let mut notifications = notifications::Manager::new();

        if let Some(key) = config_warning {
            notifications.push(notifications::Notification::warning(key));
        }

        let base_url = flags
            .server
            .clone()
            .unwrap_or_else(|| config.server.base_url().to_string());
        let client = HttpClient::new(&base_url, config.server.request_timeout());
        match &client {
            Ok(_) => tracing::info!(%base_url, "using listing service"),
            Err(error) => {
                tracing::error!(%base_url, %error, "unusable listing service URL");
                notifications.push(
                    notifications::Notification::error("notification-invalid-server")
                        .with_arg("url", base_url.clone()),
                );
            }
        }

        let storage: Box<dyn KeyValueStore> = match FileStore::in_app_data_dir(None) {
            Some(store) => {
                tracing::debug!(dir = %store.dir().display(), "favorites stored on disk");
                Box::new(store)
            }
            None => {
                tracing::warn!("no data directory, favorites will not persist");
                notifications.push(notifications::Notification::warning(
                    "notification-favorites-memory-only",
                ));
                Box::new(MemoryStore::new())
            }
        };

        let mut app = App {
            i18n,
            screen: Screen::Home,
            theme: config.general.theme_mode.to_iced_theme(),
            client,
            display: config.display.clone(),
            home: home::State::default(),
            albums: albums::State::default(),
            favorites_view: favorites::State::default(),
            favorites: FavoritesStore::load(storage),
            cursor: MediaCursor::new(),
            lightbox: lightbox::State::default(),
            previews: RenditionCache::new(config.prefetch.to_prefetch_config()),
            thumbnails: RenditionCache::new(thumbnail_cache_config()),
            grid_offset: 0.0,
            auth_url: None,
            notifications,
            downloading: false,
        };

        let task = match flags.folder {
            Some(folder_id) => {
                app.screen = Screen::Albums;
                let ticket = app.albums.navigator.enter_folder(folder_id.clone(), folder_id);
                app.fetch_listing(Screen::Albums, ticket)
            }
            None => app.load_screen(Screen::Home),
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        if let Some(item) = self.cursor.current() {
            return format!("{} - {app_name}", item.name);
        }

        let folder_name = match self.screen {
            Screen::Albums => self.albums.navigator.current_folder_name(),
            Screen::Home | Screen::Favorites => None,
        };
        match folder_name {
            Some(name) => format!("{name} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_keyboard_subscription(self.cursor.is_open()),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navbar(message) => self.handle_navbar_message(message),
            Message::Home(message) => self.handle_home_message(message),
            Message::Albums(message) => self.handle_albums_message(message),
            Message::Favorites(message) => self.handle_favorites_message(message),
            Message::Lightbox(message) => self.handle_lightbox_message(message),
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::ListingLoaded {
                screen,
                ticket,
                result,
            } => self.handle_listing_loaded(screen, ticket, result),
            Message::FavoritesGathered { generation, result } => {
                self.handle_favorites_gathered(generation, result)
            }
            Message::CoversLoaded { generation, covers } => {
                self.handle_covers_loaded(generation, covers)
            }
            Message::ThumbnailLoaded { url, result } => {
                self.handle_thumbnail_loaded(url, result);
                Task::none()
            }
            Message::PreviewLoaded { url, result } => {
                self.handle_preview_loaded(url, result);
                Task::none()
            }
            Message::DownloadTargetChosen { item, path } => {
                self.handle_download_target(item, path)
            }
            Message::DownloadFinished { name, result } => {
                self.handle_download_finished(name, result);
                Task::none()
            }
            Message::OpenSignIn => {
                if let Some(url) = self.auth_url.clone() {
                    self.open_in_browser(&url);
                }
                Task::none()
            }
            Message::RetryAfterAuth => {
                self.auth_url = None;
                self.load_screen(self.screen)
            }
            Message::Tick(now) => {
                self.notifications.tick(now);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::ListingOutcome;
use crate::application::query::{AlbumCover, Gathered, RequestTicket};
use crate::domain::media::MediaItem;
use crate::error::Result;
use crate::media::Rendition;
use crate::ui::{albums, favorites, home, lightbox, navbar, notifications};
use std::path::PathBuf;
use std::time::Instant;

use super::Screen;

/// Top-level messages consumed by `App::update`. Component messages are
/// forwarded; the rest are completions of background work.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Home(home::Message),
    Albums(albums::Message),
    Favorites(favorites::Message),
    Lightbox(lightbox::Message),
    Notification(notifications::NotificationMessage),
    ListingLoaded {
        screen: Screen,
        ticket: RequestTicket,
        result: Result<ListingOutcome>,
    },
    FavoritesGathered {
        generation: u64,
        result: Result<Gathered<Vec<MediaItem>>>,
    },
    CoversLoaded {
        generation: u64,
        covers: Gathered<Vec<AlbumCover>>,
    },
    ThumbnailLoaded {
        url: String,
        result: Result<Rendition>,
    },
    PreviewLoaded {
        url: String,
        result: Result<Rendition>,
    },
    /// Result of the save dialog for the focused item.
    DownloadTargetChosen {
        item: MediaItem,
        path: Option<PathBuf>,
    },
    DownloadFinished {
        name: String,
        result: Result<u64>,
    },
    /// Open the sign-in page in the system browser.
    OpenSignIn,
    /// Reload the active screen after signing in.
    RetryAfterAuth,
    Tick(Instant),
}

/// Runtime flags passed from the launcher to the UI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g., `en-US`).
    pub lang: Option<String>,
    /// Listing service base URL, overriding the config file.
    pub server: Option<String>,
    /// Folder to open on the Albums screen at start-up.
    pub folder: Option<String>,
}

// SPDX-License-Identifier: MPL-2.0
//! Query services (read-side).
//!
//! # Available Services
//!
//! - [`cursor`]: Viewer position over a listing (`MediaCursor`)
//! - [`navigation`]: Root/folder browsing with stale-response guard (`FolderNavigator`)
//! - [`collections`]: Multi-folder queries (favorites, album covers)
//!
//! None of these perform I/O directly except through the
//! [`ListingSource`](crate::application::port::ListingSource) port.

pub mod collections;
pub mod cursor;
pub mod navigation;

pub use collections::{gather_favorites, load_album_covers, AlbumCover, Gathered};
pub use cursor::{CursorState, MediaCursor, Position};
pub use navigation::{ApplyResult, FolderNavigator, FolderTarget, RequestGuard, RequestTicket};

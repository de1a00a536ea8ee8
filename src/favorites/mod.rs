// SPDX-License-Identifier: MPL-2.0
//! Client-local favorites.
//!
//! Favorites are keyed only by item identifier and live outside any listing,
//! so an item stays favorited when it moves between folders.

pub mod store;

pub use store::{FavoritesStore, FAVORITES_KEY};

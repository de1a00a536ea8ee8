// SPDX-License-Identifier: MPL-2.0
//! Persisted set of favorited media identifiers.

use crate::application::port::KeyValueStore;
use crate::domain::media::MediaItem;
use std::collections::HashSet;

/// Storage key holding the favorites document (a JSON array of strings).
pub const FAVORITES_KEY: &str = "favorite-photo-ids";

/// The set of favorited item identifiers.
///
/// The in-memory list is authoritative for the session. It is read once from
/// the backing store and written back after every toggle. Storage failures
/// never reach the caller: a failed read yields an empty set and a failed write
/// is logged and dropped.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    ids: Vec<String>,
    write_failed: bool,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads the favorites from `storage`.
    pub fn load(storage: S) -> Self {
        let ids = read_ids(&storage);
        tracing::debug!(count = ids.len(), "favorites loaded");
        Self {
            storage,
            ids,
            write_failed: false,
        }
    }

    /// Returns `true` if `id` is currently a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Flips membership of `id`, persists the set, and returns the new state.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = if let Some(pos) = self.ids.iter().position(|fav| fav == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        };
        self.flush();
        now_favorite
    }

    /// All favorited identifiers, in the order they were added.
    #[must_use]
    pub fn list_favorite_ids(&self) -> Vec<String> {
        self.ids.clone()
    }

    /// Favorites as a set, for membership tests over large listings.
    #[must_use]
    pub fn id_set(&self) -> HashSet<String> {
        self.ids.iter().cloned().collect()
    }

    /// Keeps the favorited items of `items`, preserving listing order.
    #[must_use]
    pub fn filter_favorites(&self, items: &[MediaItem]) -> Vec<MediaItem> {
        let set = self.id_set();
        items
            .iter()
            .filter(|item| set.contains(&item.id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `true` when the most recent write to the backing store failed.
    #[must_use]
    pub fn last_write_failed(&self) -> bool {
        self.write_failed
    }

    fn flush(&mut self) {
        let document = match serde_json::to_string(&self.ids) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(%error, "could not serialize favorites");
                self.write_failed = true;
                return;
            }
        };
        self.write_failed = match self.storage.set(FAVORITES_KEY, &document) {
            Ok(()) => false,
            Err(error) => {
                tracing::warn!(%error, "could not persist favorites");
                true
            }
        };
    }
}

fn read_ids<S: KeyValueStore>(storage: &S) -> Vec<String> {
    let raw = match storage.get(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(%error, "could not read favorites");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => {
            let mut seen = HashSet::new();
            ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
        }
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable favorites document");
            Vec::new()
        }
    }
}

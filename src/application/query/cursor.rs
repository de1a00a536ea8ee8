// SPDX-License-Identifier: MPL-2.0
//! Viewer cursor over the items of the browsed listing.
//!
//! [`MediaCursor`] is the single source of truth for "which item is focused"
//! while the lightbox is open. It owns a snapshot of the listing's items and a
//! two-state machine:
//!
//! ```text
//! Closed --open(items, i)--> Open(i)          (only when items is non-empty)
//! Open(i) --close()-------> Closed
//! Open(i) --next()--------> Open((i + 1) mod n)
//! Open(i) --previous()----> Open((i + n - 1) mod n)
//! ```
//!
//! Index arithmetic wraps in both directions, so the cursor never points
//! outside `0..len` while open.

use crate::domain::media::MediaItem;
use std::fmt;

/// Open/closed state of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

/// Position badge rendered by the lightbox ("3 / 12").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based position of the focused item.
    pub ordinal: usize,
    pub total: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.ordinal, self.total)
    }
}

/// Circular cursor over an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCursor<T = MediaItem> {
    items: Vec<T>,
    state: CursorState,
}

impl<T> MediaCursor<T> {
    /// Creates a closed cursor with no items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            state: CursorState::Closed,
        }
    }

    /// Opens the viewer on `items`, focused on `start_index`.
    ///
    /// Opening on an empty collection is a no-op: the cursor stays (or
    /// becomes) closed and `false` is returned. A start index past the end is
    /// clamped to the last item.
    pub fn open(&mut self, items: Vec<T>, start_index: usize) -> bool {
        if items.is_empty() {
            self.close();
            return false;
        }

        let index = start_index.min(items.len() - 1);
        self.items = items;
        self.state = CursorState::Open { index };
        true
    }

    /// Closes the viewer and drops the item snapshot. Idempotent.
    pub fn close(&mut self) {
        self.items.clear();
        self.state = CursorState::Closed;
    }

    /// Moves to the next item, wrapping from the last to the first.
    ///
    /// Returns the newly focused item, or `None` when closed.
    pub fn next(&mut self) -> Option<&T> {
        let CursorState::Open { index } = self.state else {
            return None;
        };
        let len = self.items.len();
        self.state = CursorState::Open {
            index: (index + 1) % len,
        };
        self.current()
    }

    /// Moves to the previous item, wrapping from the first to the last.
    ///
    /// Returns the newly focused item, or `None` when closed.
    pub fn previous(&mut self) -> Option<&T> {
        let CursorState::Open { index } = self.state else {
            return None;
        };
        let len = self.items.len();
        self.state = CursorState::Open {
            index: (index + len - 1) % len,
        };
        self.current()
    }

    /// Returns the focused item, or `None` when closed.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        match self.state {
            CursorState::Open { index } => self.items.get(index),
            CursorState::Closed => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, CursorState::Open { .. })
    }

    /// Returns the focused index, or `None` when closed.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self.state {
            CursorState::Open { index } => Some(index),
            CursorState::Closed => None,
        }
    }

    /// Number of items in the snapshot (0 when closed).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the position badge for the focused item.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.index().map(|index| Position {
            ordinal: index + 1,
            total: self.items.len(),
        })
    }

    /// Indices worth loading around the focused item: the item itself, then
    /// the next and previous neighbours (wrapped, without duplicates).
    ///
    /// Empty when closed.
    #[must_use]
    pub fn neighbor_indices(&self) -> Vec<usize> {
        let Some(index) = self.index() else {
            return Vec::new();
        };
        let len = self.items.len();
        let mut indices = vec![index];
        for candidate in [(index + 1) % len, (index + len - 1) % len] {
            if !indices.contains(&candidate) {
                indices.push(candidate);
            }
        }
        indices
    }

    /// Items at [`neighbor_indices`](Self::neighbor_indices), in the same order.
    #[must_use]
    pub fn neighbors(&self) -> Vec<&T> {
        self.neighbor_indices()
            .into_iter()
            .filter_map(|i| self.items.get(i))
            .collect()
    }

    /// Swaps in a refreshed collection while the viewer is open.
    ///
    /// The item with the same key as the focused one stays focused when it is
    /// still present; otherwise the index is clamped into the new range. An
    /// empty collection closes the viewer. A closed cursor stays closed.
    pub fn replace_items_by<K, F>(&mut self, items: Vec<T>, key: F)
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let Some(index) = self.index() else {
            return;
        };
        if items.is_empty() {
            self.close();
            return;
        }

        let focused_key = self.items.get(index).map(&key);
        let new_index = focused_key
            .and_then(|focused| items.iter().position(|item| key(item) == focused))
            .unwrap_or_else(|| index.min(items.len() - 1));

        self.items = items;
        self.state = CursorState::Open { index: new_index };
    }
}

impl MediaCursor<MediaItem> {
    /// Swaps in a refreshed listing, keeping the focused item by identifier.
    pub fn replace_items(&mut self, items: Vec<MediaItem>) {
        self.replace_items_by(items, |item| item.id.clone());
    }
}

impl<T> Default for MediaCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Folder navigation over the remote listing service.
//!
//! [`FolderNavigator`] tracks whether the user is at the root or inside a
//! folder and holds the listing currently on screen. It does not perform I/O:
//! each navigation call returns a [`RequestTicket`] that the host turns into a
//! fetch, and the fetch result is handed back through
//! [`FolderNavigator::apply`].
//!
//! # Out-of-order completion
//!
//! Every ticket carries a generation number from a [`RequestGuard`]. Only the
//! most recently issued ticket may change state; anything older is reported as
//! [`ApplyResult::Stale`] and dropped. Cancelling (screen switch) bumps the
//! generation so late results from the abandoned view are dropped too.

use crate::application::port::ListingOutcome;
use crate::domain::media::{FolderRef, Listing, MediaItem};
use crate::error::{Error, Result};

/// Issues generation-tagged request numbers; only the newest one counts.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    latest: u64,
    pending: bool,
}

impl RequestGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request and returns its generation.
    pub fn issue(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.pending = true;
        self.latest
    }

    /// Returns `true` if `generation` is the newest request.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    /// Marks `generation` as completed.
    ///
    /// Returns `false` (and changes nothing) when the generation is stale or
    /// has already been settled.
    pub fn settle(&mut self, generation: u64) -> bool {
        if !self.pending || !self.is_current(generation) {
            return false;
        }
        self.pending = false;
        true
    }

    /// Abandons the outstanding request, if any.
    pub fn cancel(&mut self) {
        if self.pending {
            self.latest = self.latest.wrapping_add(1);
            self.pending = false;
        }
    }

    /// Returns `true` while the newest request has not completed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Folder a listing request points at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FolderTarget {
    /// The service's configured root folder.
    #[default]
    Root,
    Folder {
        id: String,
        name: String,
    },
}

impl FolderTarget {
    /// Identifier to send to the listing service (`None` for the root).
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            FolderTarget::Root => None,
            FolderTarget::Folder { id, .. } => Some(id),
        }
    }
}

/// Handle for one in-flight listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    target: FolderTarget,
}

impl RequestTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn target(&self) -> &FolderTarget {
        &self.target
    }

    /// Identifier to send to the listing service (`None` for the root).
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.target.parent_id()
    }
}

/// What happened when a fetch result was handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyResult {
    /// The result replaced the displayed state.
    Applied,
    /// A newer request exists (or the request was cancelled); nothing changed.
    Stale,
    /// The service asked for sign-in; the host must redirect to this URL.
    NeedsAuth(String),
    /// The fetch failed; the error is available through `last_error`.
    Failed,
}

/// Root/folder browsing state for one view.
#[derive(Debug, Clone, Default)]
pub struct FolderNavigator {
    guard: RequestGuard,
    displayed: FolderTarget,
    root_folder_id: Option<String>,
    listing: Listing,
    last_error: Option<Error>,
}

impl FolderNavigator {
    /// Creates a navigator showing an empty root listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the children of folder `id`.
    pub fn enter_folder(&mut self, id: impl Into<String>, name: impl Into<String>) -> RequestTicket {
        self.issue(FolderTarget::Folder {
            id: id.into(),
            name: name.into(),
        })
    }

    /// Requests the root listing.
    pub fn return_to_root(&mut self) -> RequestTicket {
        self.issue(FolderTarget::Root)
    }

    /// Re-requests the folder currently on screen.
    pub fn refresh(&mut self) -> RequestTicket {
        let target = self.displayed.clone();
        self.issue(target)
    }

    fn issue(&mut self, target: FolderTarget) -> RequestTicket {
        let generation = self.guard.issue();
        self.last_error = None;
        tracing::debug!(generation, ?target, "listing requested");
        RequestTicket { generation, target }
    }

    /// Hands a fetch result back to the navigator.
    ///
    /// Only the newest ticket is applied. A listing replaces the displayed
    /// folder wholesale; a failure keeps the previous listing and records the
    /// error; an auth redirect leaves everything untouched.
    pub fn apply(&mut self, ticket: RequestTicket, result: Result<ListingOutcome>) -> ApplyResult {
        if !self.guard.settle(ticket.generation) {
            tracing::debug!(generation = ticket.generation, "dropping stale listing response");
            return ApplyResult::Stale;
        }

        match result {
            Ok(ListingOutcome::Listing(listing)) => {
                if ticket.target == FolderTarget::Root && self.root_folder_id.is_none() {
                    self.root_folder_id.clone_from(&listing.parent_id);
                }
                tracing::debug!(
                    folders = listing.folders.len(),
                    items = listing.items.len(),
                    "listing applied"
                );
                self.displayed = ticket.target;
                self.listing = listing;
                self.last_error = None;
                ApplyResult::Applied
            }
            Ok(ListingOutcome::NeedsAuth { auth_url }) => ApplyResult::NeedsAuth(auth_url),
            Err(error) => {
                tracing::warn!(%error, "listing request failed");
                self.last_error = Some(error);
                ApplyResult::Failed
            }
        }
    }

    /// Abandons the outstanding request so its result can no longer change state.
    pub fn cancel(&mut self) {
        self.guard.cancel();
    }

    /// Returns `true` when the displayed listing is the root folder.
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        match &self.displayed {
            FolderTarget::Root => true,
            FolderTarget::Folder { id, .. } => self.root_folder_id.as_deref() == Some(id.as_str()),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.guard.is_pending()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    #[must_use]
    pub fn current_items(&self) -> &[MediaItem] {
        &self.listing.items
    }

    #[must_use]
    pub fn current_folders(&self) -> &[FolderRef] {
        &self.listing.folders
    }

    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Name of the folder on screen, or `None` at the root.
    #[must_use]
    pub fn current_folder_name(&self) -> Option<&str> {
        match &self.displayed {
            FolderTarget::Folder { name, .. } if !self.is_at_root() => Some(name),
            _ => None,
        }
    }

    /// Identifier of the root folder, learned from the first root listing.
    #[must_use]
    pub fn root_folder_id(&self) -> Option<&str> {
        self.root_folder_id.as_deref()
    }

    #[must_use]
    pub fn displayed_target(&self) -> &FolderTarget {
        &self.displayed
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains the listing vocabulary shared by every layer: items,
//! folders and listings.

pub mod types;

pub use types::{FolderRef, Listing, MediaItem, MediaKind};

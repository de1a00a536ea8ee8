// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, so the application layer stays
//! independent of HTTP clients and file formats.
//!
//! # Available Ports
//!
//! - [`listing`]: Remote folder listings
//! - [`storage`]: Persistent key/value storage
//!
//! # Design Notes
//!
//! - Listing futures are `Send` so callers can hand them to Iced's `Task::perform`
//! - Storage is synchronous: values are small and writes are flushed immediately

pub mod listing;
pub mod storage;

pub use listing::{ListingOutcome, ListingSource, DEFAULT_AUTH_PATH};
pub use storage::KeyValueStore;

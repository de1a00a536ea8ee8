// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: Listing and rendition service over HTTP (implements [`ListingSource`])
//! - [`storage`]: File-backed and in-memory key/value stores (implement [`KeyValueStore`])
//!
//! [`ListingSource`]: crate::application::port::ListingSource
//! [`KeyValueStore`]: crate::application::port::KeyValueStore

pub mod http;
pub mod storage;

pub use http::HttpClient;
pub use storage::{FileStore, MemoryStore};

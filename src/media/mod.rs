// SPDX-License-Identifier: MPL-2.0
//! Server-side renditions and their client-side cache.
//!
//! - [`rendition`]: URLs of thumbnails, previews, originals and downloads
//! - [`prefetch`]: LRU cache of fetched renditions and the background loader

pub mod prefetch;
pub mod rendition;

pub use prefetch::{PrefetchConfig, Rendition, RenditionCache};
pub use rendition::RenditionUrls;

// SPDX-License-Identifier: MPL-2.0
//! `drive_lens` is a desktop photo viewer for a remote drive, built with the
//! Iced GUI framework.
//!
//! Listings come from a small HTTP service that fronts the drive. The app
//! browses the root folder and its albums, keeps a local favorites set, and
//! shows items in a lightbox with neighbor prefetch.
//!
//! Layers, innermost first:
//!
//! - [`domain`]: listing vocabulary, `std` only
//! - [`application`]: ports and the navigation queries built on them
//! - [`infrastructure`]: the HTTP client and key-value storage adapters
//! - [`media`], [`favorites`]: rendition URLs and caching, favorites set
//! - [`app`], [`ui`]: the Iced shell

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod favorites;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;

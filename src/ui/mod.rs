// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes a `Message`, an `update` that turns it into an `Event` for the app,
//! and a `view` over a borrowed `ViewContext`.
//!
//! # Screens
//!
//! - [`home`] - Root listing with a hero image
//! - [`albums`] - Folder covers and folder contents
//! - [`favorites`] - Favorited items gathered across albums
//! - [`lightbox`] - Full-window viewer over the cursor
//!
//! # Shared Infrastructure
//!
//! - [`gallery`] - Thumbnail grid and favorite toggle
//! - [`notice`] - Loading, empty, error and sign-in panels
//! - [`navbar`] - Screen tabs and refresh
//! - [`notifications`] - Toasts
//! - [`styles`], [`design_tokens`], [`theming`] - Visual system

pub mod albums;
pub mod design_tokens;
pub mod favorites;
pub mod gallery;
pub mod home;
pub mod lightbox;
pub mod navbar;
pub mod notice;
pub mod notifications;
pub mod styles;
pub mod theming;

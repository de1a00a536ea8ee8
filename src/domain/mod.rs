// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects. It depends on
//! `std` only, so it stays trivially testable.
//!
//! # Modules
//!
//! - [`media`]: Listing types ([`MediaItem`](media::MediaItem),
//!   [`FolderRef`](media::FolderRef), [`Listing`](media::Listing))

pub mod media;

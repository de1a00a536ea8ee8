// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Server**: Listing service location and request timeout
//! - **Display**: Rendition widths requested from the service
//! - **Prefetch**: Rendition cache bounds

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Listing/rendition service used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Default per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 2;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Display Defaults
// ==========================================================================

pub use crate::media::rendition::{DEFAULT_PREVIEW_WIDTH, DEFAULT_THUMBNAIL_WIDTH};

/// Number of thumbnails per grid row.
pub const DEFAULT_GRID_COLUMNS: u32 = 4;

/// Minimum grid columns.
pub const MIN_GRID_COLUMNS: u32 = 1;

/// Maximum grid columns.
pub const MAX_GRID_COLUMNS: u32 = 8;

// ==========================================================================
// Prefetch Defaults
// ==========================================================================

pub use crate::media::prefetch::{
    DEFAULT_MAX_ENTRIES, DEFAULT_PREFETCH_CACHE_BYTES, MAX_MAX_ENTRIES, MAX_PREFETCH_CACHE_BYTES,
    MIN_MAX_ENTRIES, MIN_PREFETCH_CACHE_BYTES,
};

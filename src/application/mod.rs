// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Cursor, navigation and collection queries
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use drive_lens::application::query::{FolderNavigator, MediaCursor};
//!
//! let mut navigator = FolderNavigator::new();
//! let ticket = navigator.return_to_root();
//! let outcome = client.children(ticket.parent_id()).await;
//! navigator.apply(ticket, outcome);
//!
//! let mut cursor = MediaCursor::new();
//! cursor.open(navigator.current_items().to_vec(), 0);
//! ```

pub mod port;
pub mod query;

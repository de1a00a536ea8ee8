// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Short-lived messages for outcomes that do not replace the current screen:
//! a finished download, a favorites write that could not be persisted, a
//! config file that failed to parse.
//!
//! ```ignore
//! let mut manager = Manager::new();
//! manager.push(Notification::success("notification-download-success")
//!     .with_arg("name", "beach.jpg"));
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;

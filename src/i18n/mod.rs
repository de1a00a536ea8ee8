// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Translation files embedded at build time
//! - Runtime language switching
//! - Visible `MISSING:` marker when a key has no translation

pub mod fluent;

pub use fluent::I18n;

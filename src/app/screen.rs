// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens reachable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Albums,
    Favorites,
}

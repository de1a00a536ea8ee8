// SPDX-License-Identifier: MPL-2.0
//! Listing service port definition.
//!
//! This module defines the [`ListingSource`] trait for fetching the children of
//! a remote folder. The HTTP adapter lives in `infrastructure::http`; tests use
//! in-memory fakes.

use crate::domain::media::Listing;
use crate::error::Result;
use std::future::Future;

/// Path the listing service redirects to when it does not say otherwise.
pub const DEFAULT_AUTH_PATH: &str = "/auth/login";

/// What the listing service answered for one folder.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    /// The folder's children, in display order.
    Listing(Listing),
    /// The service needs the user to sign in first. The host must send the
    /// user to `auth_url` and stop rendering the listing.
    NeedsAuth {
        /// Absolute sign-in URL.
        auth_url: String,
    },
}

/// Port for fetching folder listings.
///
/// `parent_id = None` asks for the configured root folder.
///
/// # Errors
///
/// Implementations return an [`Error`](crate::error::Error) for transport
/// failures, non-success statuses and undecodable bodies. An auth redirect is
/// not an error; it is reported as [`ListingOutcome::NeedsAuth`].
pub trait ListingSource: Send + Sync {
    fn children(
        &self,
        parent_id: Option<&str>,
    ) -> impl Future<Output = Result<ListingOutcome>> + Send;
}

// SPDX-License-Identifier: MPL-2.0
//! Multi-folder queries built on top of [`ListingSource`].
//!
//! - [`gather_favorites`]: the favorited items across the root and every
//!   root sub-folder, in listing order.
//! - [`load_album_covers`]: the first item of each folder, for album tiles.
//!
//! Both issue their per-folder requests concurrently.

use crate::application::port::{ListingOutcome, ListingSource};
use crate::domain::media::{FolderRef, Listing, MediaItem};
use crate::error::Result;
use futures_util::future::join_all;
use std::collections::HashSet;

/// Result of a query that may be interrupted by a sign-in redirect.
#[derive(Debug, Clone, PartialEq)]
pub enum Gathered<T> {
    Ready(T),
    NeedsAuth(String),
}

/// Album cover lookup result: folder identifier and its first item.
pub type AlbumCover = (String, Option<MediaItem>);

/// Collects every favorited item reachable from the root.
///
/// Root items come first, then each sub-folder's items in folder order. An
/// item present in several folders is kept once, at its first position.
///
/// # Errors
///
/// Fails if the root listing or any folder listing fails. A sign-in redirect
/// on any response is returned as [`Gathered::NeedsAuth`].
pub async fn gather_favorites<S: ListingSource>(
    source: &S,
    favorite_ids: &HashSet<String>,
) -> Result<Gathered<Vec<MediaItem>>> {
    let Listing { folders, items, .. } = match source.children(None).await? {
        ListingOutcome::Listing(listing) => listing,
        ListingOutcome::NeedsAuth { auth_url } => return Ok(Gathered::NeedsAuth(auth_url)),
    };

    let responses = join_all(folders.iter().map(|f| source.children(Some(&f.id)))).await;

    let mut all = items;
    for response in responses {
        match response? {
            ListingOutcome::Listing(listing) => all.extend(listing.items),
            ListingOutcome::NeedsAuth { auth_url } => return Ok(Gathered::NeedsAuth(auth_url)),
        }
    }

    let mut seen = HashSet::new();
    let favorites: Vec<MediaItem> = all
        .into_iter()
        .filter(|item| favorite_ids.contains(&item.id) && seen.insert(item.id.clone()))
        .collect();

    tracing::debug!(count = favorites.len(), "favorites gathered");
    Ok(Gathered::Ready(favorites))
}

/// Fetches the first item of each folder.
///
/// A folder whose listing fails gets `None`. A sign-in redirect on any
/// response aborts with [`Gathered::NeedsAuth`].
pub async fn load_album_covers<S: ListingSource>(
    source: &S,
    folders: &[FolderRef],
) -> Gathered<Vec<AlbumCover>> {
    let responses = join_all(folders.iter().map(|folder| async move {
        (folder.id.clone(), source.children(Some(&folder.id)).await)
    }))
    .await;

    let mut covers = Vec::with_capacity(responses.len());
    for (id, response) in responses {
        match response {
            Ok(ListingOutcome::Listing(listing)) => {
                covers.push((id, listing.items.into_iter().next()));
            }
            Ok(ListingOutcome::NeedsAuth { auth_url }) => return Gathered::NeedsAuth(auth_url),
            Err(error) => {
                tracing::debug!(folder = %id, %error, "album cover unavailable");
                covers.push((id, None));
            }
        }
    }
    Gathered::Ready(covers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSource {
        folders: HashMap<Option<String>, Result<ListingOutcome>>,
    }

    impl FakeSource {
        fn with(mut self, parent: Option<&str>, outcome: Result<ListingOutcome>) -> Self {
            self.folders.insert(parent.map(str::to_string), outcome);
            self
        }
    }

    impl ListingSource for FakeSource {
        async fn children(&self, parent_id: Option<&str>) -> Result<ListingOutcome> {
            self.folders
                .get(&parent_id.map(str::to_string))
                .cloned()
                .unwrap_or(Err(Error::Http { status: 404 }))
        }
    }

    fn item(id: &str) -> MediaItem {
        MediaItem::new(id, format!("{id}.jpg"), "image/jpeg").unwrap()
    }

    fn listing(folders: &[&str], items: &[&str]) -> Result<ListingOutcome> {
        Ok(ListingOutcome::Listing(Listing::new(
            None,
            folders.iter().map(|f| FolderRef::new(*f, *f)).collect(),
            items.iter().map(|i| item(i)).collect(),
        )))
    }

    fn ids(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn favorites_keep_listing_order_across_folders() {
        let source = FakeSource::default()
            .with(None, listing(&["f1", "f2"], &["r1", "r2"]))
            .with(Some("f1"), listing(&[], &["a", "b"]))
            .with(Some("f2"), listing(&[], &["c"]));

        let result = gather_favorites(&source, &set(&["c", "r2", "a"])).await.unwrap();
        match result {
            Gathered::Ready(items) => assert_eq!(ids(&items), vec!["r2", "a", "c"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn favorites_deduplicate_items_in_multiple_folders() {
        let source = FakeSource::default()
            .with(None, listing(&["f1"], &["x"]))
            .with(Some("f1"), listing(&[], &["x", "y"]));

        let result = gather_favorites(&source, &set(&["x", "y"])).await.unwrap();
        assert_eq!(result, Gathered::Ready(vec![item("x"), item("y")]));
    }

    #[tokio::test]
    async fn favorites_fail_when_a_folder_fails() {
        let source = FakeSource::default().with(None, listing(&["missing"], &["x"]));
        let result = gather_favorites(&source, &set(&["x"])).await;
        assert_eq!(result, Err(Error::Http { status: 404 }));
    }

    #[tokio::test]
    async fn favorites_stop_on_auth_redirect() {
        let source = FakeSource::default()
            .with(None, listing(&["f1"], &[]))
            .with(
                Some("f1"),
                Ok(ListingOutcome::NeedsAuth {
                    auth_url: "http://svc/auth/login".into(),
                }),
            );
        let result = gather_favorites(&source, &set(&[])).await.unwrap();
        assert_eq!(result, Gathered::NeedsAuth("http://svc/auth/login".into()));
    }

    #[tokio::test]
    async fn covers_use_first_item_and_tolerate_failures() {
        let source = FakeSource::default()
            .with(Some("f1"), listing(&[], &["a", "b"]))
            .with(Some("f2"), listing(&[], &[]))
            .with(Some("f3"), Err(Error::Network("reset".into())));
        let folders = vec![
            FolderRef::new("f1", "One"),
            FolderRef::new("f2", "Two"),
            FolderRef::new("f3", "Three"),
        ];

        let covers = load_album_covers(&source, &folders).await;
        assert_eq!(
            covers,
            Gathered::Ready(vec![
                ("f1".to_string(), Some(item("a"))),
                ("f2".to_string(), None),
                ("f3".to_string(), None),
            ])
        );
    }
}

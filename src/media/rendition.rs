// SPDX-License-Identifier: MPL-2.0
//! URLs of the server-side renditions of a media item.
//!
//! The rendition service exposes, per item:
//!
//! | Rendition | Path                                   |
//! |-----------|----------------------------------------|
//! | thumbnail | `/drive/file/{id}/thumbnail?s={width}` |
//! | preview   | `/drive/file/{id}/preview?w={width}`   |
//! | content   | `/drive/file/{id}/content`             |
//! | download  | `/drive/file/{id}/download`            |
//!
//! Identifiers are percent-encoded as a single path segment.

use crate::domain::media::MediaItem;
use crate::error::{Error, Result};
use reqwest::Url;
use std::ops::RangeInclusive;

/// Accepted thumbnail widths.
pub const THUMBNAIL_WIDTH_RANGE: RangeInclusive<u32> = 64..=2000;

/// Accepted preview widths.
pub const PREVIEW_WIDTH_RANGE: RangeInclusive<u32> = 400..=4096;

/// Thumbnail width used by grids.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 600;

/// Preview width used by the lightbox.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 1600;

/// Builds rendition URLs relative to the service base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenditionUrls {
    base: Url,
}

impl RenditionUrls {
    /// Parses `base_url` (e.g. `http://localhost:8000`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Thumbnail URL, width clamped to [`THUMBNAIL_WIDTH_RANGE`].
    #[must_use]
    pub fn thumbnail(&self, id: &str, width: u32) -> Url {
        let width = width.clamp(*THUMBNAIL_WIDTH_RANGE.start(), *THUMBNAIL_WIDTH_RANGE.end());
        let mut url = self.file_url(id, "thumbnail");
        url.query_pairs_mut().append_pair("s", &width.to_string());
        url
    }

    /// Preview URL, width clamped to [`PREVIEW_WIDTH_RANGE`].
    #[must_use]
    pub fn preview(&self, id: &str, width: u32) -> Url {
        let width = width.clamp(*PREVIEW_WIDTH_RANGE.start(), *PREVIEW_WIDTH_RANGE.end());
        let mut url = self.file_url(id, "preview");
        url.query_pairs_mut().append_pair("w", &width.to_string());
        url
    }

    #[must_use]
    pub fn content(&self, id: &str) -> Url {
        self.file_url(id, "content")
    }

    #[must_use]
    pub fn download(&self, id: &str) -> Url {
        self.file_url(id, "download")
    }

    /// Link to the full-resolution original.
    ///
    /// HEIC/HEIF items point at the provider's web view when one is known,
    /// since the raw content is not viewable in most browsers.
    #[must_use]
    pub fn original(&self, item: &MediaItem) -> String {
        match (&item.web_view_link, item.is_heif()) {
            (Some(link), true) => link.clone(),
            _ => self.content(&item.id).into(),
        }
    }

    /// Resolves a possibly relative URL (such as a sign-in path) against the base.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the reference cannot be joined.
    pub fn resolve(&self, reference: &str) -> Result<Url> {
        self.base
            .join(reference)
            .map_err(|e| Error::InvalidUrl(format!("{reference}: {e}")))
    }

    /// `{base}/drive/children`, the listing endpoint.
    #[must_use]
    pub fn children(&self, parent_id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["drive", "children"]);
        }
        if let Some(id) = parent_id {
            url.query_pairs_mut().append_pair("parentId", id);
        }
        url
    }

    fn file_url(&self, id: &str, rendition: &str) -> Url {
        let mut url = self.base.clone();
        // Base URLs are validated as http(s), which always have path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["drive", "file", id, rendition]);
        }
        url
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "{base_url}: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> RenditionUrls {
        RenditionUrls::new("http://localhost:8000").unwrap()
    }

    #[test]
    fn thumbnail_clamps_width() {
        let urls = urls();
        assert_eq!(
            urls.thumbnail("abc", 600).as_str(),
            "http://localhost:8000/drive/file/abc/thumbnail?s=600"
        );
        assert!(urls.thumbnail("abc", 1).as_str().ends_with("s=64"));
        assert!(urls.thumbnail("abc", 9999).as_str().ends_with("s=2000"));
    }

    #[test]
    fn preview_clamps_width() {
        let urls = urls();
        assert!(urls.preview("abc", 100).as_str().ends_with("preview?w=400"));
        assert!(urls.preview("abc", 1600).as_str().ends_with("preview?w=1600"));
        assert!(urls.preview("abc", 10_000).as_str().ends_with("preview?w=4096"));
    }

    #[test]
    fn identifiers_are_percent_encoded() {
        let url = urls().content("a/b c?");
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/drive/file/a%2Fb%20c%3F/content"
        );
    }

    #[test]
    fn base_path_is_preserved() {
        let urls = RenditionUrls::new("https://photos.example.com/api/").unwrap();
        assert_eq!(
            urls.download("x").as_str(),
            "https://photos.example.com/api/drive/file/x/download"
        );
        assert_eq!(
            urls.children(Some("f 1")).as_str(),
            "https://photos.example.com/api/drive/children?parentId=f+1"
        );
    }

    #[test]
    fn children_without_parent_has_no_query() {
        assert_eq!(
            urls().children(None).as_str(),
            "http://localhost:8000/drive/children"
        );
    }

    #[test]
    fn original_uses_web_view_for_heif() {
        let urls = urls();
        let mut heic = MediaItem::new("h", "IMG.HEIC", "image/heic").unwrap();
        heic.web_view_link = Some("https://drive.example.com/view/h".into());
        assert_eq!(urls.original(&heic), "https://drive.example.com/view/h");

        let mut jpeg = MediaItem::new("j", "a.jpg", "image/jpeg").unwrap();
        jpeg.web_view_link = Some("https://drive.example.com/view/j".into());
        assert_eq!(
            urls.original(&jpeg),
            "http://localhost:8000/drive/file/j/content"
        );

        let bare_heic = MediaItem::new("h2", "x.heif", "image/heif").unwrap();
        assert!(urls.original(&bare_heic).ends_with("/drive/file/h2/content"));
    }

    #[test]
    fn resolve_handles_relative_and_absolute() {
        let urls = urls();
        assert_eq!(
            urls.resolve("/auth/login").unwrap().as_str(),
            "http://localhost:8000/auth/login"
        );
        assert_eq!(
            urls.resolve("https://accounts.example.com/o/auth").unwrap().as_str(),
            "https://accounts.example.com/o/auth"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(
            RenditionUrls::new("file:///tmp"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            RenditionUrls::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}

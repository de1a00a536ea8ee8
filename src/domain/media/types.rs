// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types describe what the remote listing service returns, without any
//! transport or presentation concerns.

/// Kind of media an item holds, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still image (JPEG, PNG, HEIC, ...).
    Image,
    /// Video stream.
    Video,
}

impl MediaKind {
    /// Classifies a MIME type. Returns `None` for anything that is neither an
    /// image nor a video.
    #[must_use]
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        let mime = mime_type.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// One photo or video in a listing.
///
/// `id` is stable across repeated listings of the same logical item, which is
/// what favorites and the viewer cursor key on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub kind: MediaKind,
    /// Browser link to the item on the storage provider, when known.
    pub web_view_link: Option<String>,
    /// Creation time as reported by the provider (RFC 3339).
    pub created_time: Option<String>,
    /// Last modification time as reported by the provider (RFC 3339).
    pub modified_time: Option<String>,
    pub size_bytes: Option<u64>,
}

impl MediaItem {
    /// Creates an item with only the required fields set.
    ///
    /// Returns `None` when the MIME type is not a supported media kind.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Option<Self> {
        let mime_type = mime_type.into();
        let kind = MediaKind::from_mime_type(&mime_type)?;
        Some(Self {
            id: id.into(),
            name: name.into(),
            mime_type,
            kind,
            web_view_link: None,
            created_time: None,
            modified_time: None,
            size_bytes: None,
        })
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// HEIC/HEIF originals cannot be displayed by most viewers, so the
    /// original link points to the provider's web view instead.
    #[must_use]
    pub fn is_heif(&self) -> bool {
        let mime = self.mime_type.to_ascii_lowercase();
        mime.contains("heic") || mime.contains("heif")
    }
}

/// A sub-folder ("album") inside a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRef {
    pub id: String,
    pub name: String,
}

impl FolderRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One fetched snapshot of a folder: its sub-folders and media items, in
/// display order. A listing is replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Identifier of the folder this listing describes.
    pub parent_id: Option<String>,
    pub folders: Vec<FolderRef>,
    pub items: Vec<MediaItem>,
}

impl Listing {
    #[must_use]
    pub fn new(parent_id: Option<String>, folders: Vec<FolderRef>, items: Vec<MediaItem>) -> Self {
        Self {
            parent_id,
            folders,
            items,
        }
    }

    /// Returns `true` when the folder has neither items nor sub-folders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.items.is_empty()
    }

    /// First item in display order, used as a folder cover.
    #[must_use]
    pub fn first_item(&self) -> Option<&MediaItem> {
        self.items.first()
    }

    /// Position of the item with the given identifier.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_classification() {
        assert_eq!(MediaKind::from_mime_type("image/jpeg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime_type("Image/HEIC"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime_type("video/mp4"), Some(MediaKind::Video));
        assert_eq!(
            MediaKind::from_mime_type("application/vnd.google-apps.folder"),
            None
        );
        assert_eq!(MediaKind::from_mime_type(""), None);
    }

    #[test]
    fn new_rejects_unsupported_mime() {
        assert!(MediaItem::new("a", "doc.pdf", "application/pdf").is_none());
        let item = MediaItem::new("a", "cat.jpg", "image/jpeg").unwrap();
        assert!(item.is_image());
        assert!(!item.is_video());
    }

    #[test]
    fn heif_detection_is_case_insensitive() {
        let heic = MediaItem::new("a", "IMG_1.HEIC", "image/HEIC").unwrap();
        let heif = MediaItem::new("b", "x.heif", "image/heif").unwrap();
        let jpeg = MediaItem::new("c", "x.jpg", "image/jpeg").unwrap();
        assert!(heic.is_heif());
        assert!(heif.is_heif());
        assert!(!jpeg.is_heif());
    }

    #[test]
    fn listing_helpers() {
        let items = vec![
            MediaItem::new("a", "a.jpg", "image/jpeg").unwrap(),
            MediaItem::new("b", "b.jpg", "image/jpeg").unwrap(),
        ];
        let listing = Listing::new(Some("root".into()), Vec::new(), items);
        assert!(!listing.is_empty());
        assert_eq!(listing.first_item().map(|i| i.id.as_str()), Some("a"));
        assert_eq!(listing.position_of("b"), Some(1));
        assert_eq!(listing.position_of("z"), None);
        assert!(Listing::default().is_empty());
    }
}

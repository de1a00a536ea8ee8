// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the listing and rendition service.
//!
//! Implements [`ListingSource`] over `GET {base}/drive/children` and provides
//! raw byte fetches for renditions plus a streamed download to disk.

use crate::application::port::{ListingOutcome, ListingSource, DEFAULT_AUTH_PATH};
use crate::domain::media::{FolderRef, Listing, MediaItem};
use crate::error::{Error, Result};
use crate::media::rendition::RenditionUrls;
use futures_util::StreamExt;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

const USER_AGENT: &str = concat!("DriveLens/", env!("CARGO_PKG_VERSION"));

/// Wire format of `/drive/children`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChildrenResponse {
    parent_id: Option<String>,
    #[serde(default)]
    folders: Vec<FolderEntry>,
    #[serde(default)]
    files: Vec<FileEntry>,
    #[serde(default)]
    needs_auth: bool,
    auth_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FolderEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry {
    id: String,
    name: String,
    #[serde(default)]
    mime_type: String,
    web_view_link: Option<String>,
    created_time: Option<String>,
    modified_time: Option<String>,
    /// Sent either as a JSON number or as a decimal string.
    size: Option<serde_json::Value>,
}

impl FileEntry {
    fn into_media_item(self) -> Option<MediaItem> {
        let size_bytes = match &self.size {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::String(s)) => s.parse().ok(),
            _ => None,
        };
        let mut item = MediaItem::new(self.id, self.name, self.mime_type)?;
        item.web_view_link = self.web_view_link;
        item.created_time = self.created_time;
        item.modified_time = self.modified_time;
        item.size_bytes = size_bytes;
        Some(item)
    }
}

/// Client for the remote listing/rendition service.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    urls: RenditionUrls,
}

impl HttpClient {
    /// Builds a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a malformed base URL, or
    /// [`Error::Network`] if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let urls = RenditionUrls::new(base_url)?;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { client, urls })
    }

    #[must_use]
    pub fn urls(&self) -> &RenditionUrls {
        &self.urls
    }

    /// Fetches a rendition and returns its body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for non-success statuses and
    /// [`Error::Network`] for transport failures.
    pub async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Streams `url` into the file at `destination` and returns the byte count.
    ///
    /// A partially written file is removed on failure.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses, transport failures and
    /// file-system errors.
    pub async fn download_to(&self, url: Url, destination: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        let result: Result<()> = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                downloaded += chunk.len() as u64;
            }
            file.flush().await?;
            Ok(())
        }
        .await;

        if let Err(error) = result {
            drop(file);
            let _ = tokio::fs::remove_file(destination).await;
            return Err(error);
        }

        tracing::info!(bytes = downloaded, path = %destination.display(), "download finished");
        Ok(downloaded)
    }

    fn interpret(&self, status: StatusCode, body: &[u8]) -> Result<ListingOutcome> {
        // The service answers 401 with a JSON auth hint; other failures may
        // carry arbitrary bodies.
        let parsed = serde_json::from_slice::<ChildrenResponse>(body);

        if status == StatusCode::UNAUTHORIZED {
            let auth_path = parsed
                .ok()
                .and_then(|r| r.auth_url)
                .unwrap_or_else(|| DEFAULT_AUTH_PATH.to_string());
            return self.needs_auth(&auth_path);
        }
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let response = parsed?;
        if response.needs_auth {
            let auth_path = response.auth_url.as_deref().unwrap_or(DEFAULT_AUTH_PATH);
            return self.needs_auth(auth_path);
        }

        let folders = response
            .folders
            .into_iter()
            .map(|f| FolderRef::new(f.id, f.name))
            .collect();
        let items = response
            .files
            .into_iter()
            .filter_map(|file| {
                let id = file.id.clone();
                let item = file.into_media_item();
                if item.is_none() {
                    tracing::debug!(%id, "skipping entry with unsupported media type");
                }
                item
            })
            .collect();

        Ok(ListingOutcome::Listing(Listing::new(
            response.parent_id,
            folders,
            items,
        )))
    }

    fn needs_auth(&self, auth_path: &str) -> Result<ListingOutcome> {
        let auth_url = self.urls.resolve(auth_path)?;
        tracing::info!(%auth_url, "listing service requires sign-in");
        Ok(ListingOutcome::NeedsAuth {
            auth_url: auth_url.into(),
        })
    }
}

impl ListingSource for HttpClient {
    async fn children(&self, parent_id: Option<&str>) -> Result<ListingOutcome> {
        let url = self.urls.children(parent_id);
        tracing::debug!(%url, "fetching listing");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        self.interpret(status, &body)
    }
}

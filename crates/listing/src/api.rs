//! Simple JSON API source.
//!
//! Talks to a remote endpoint that exposes one-directory listings as JSON:
//! `GET {base}/list?path=<directory>` with a bearer API key. The endpoint
//! returns the directory title, its files and a `path -> title` map of its
//! immediate subdirectories.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::entry::{FileEntry, FlatEntry};
use crate::error::ListingError;
use crate::path::DirectoryPath;
use crate::source::{Credentials, DirectorySource};

pub struct SimpleApiSource {
    base_url: String,
    client: reqwest::Client,
}

/// Listing payload as the remote endpoint serializes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiListing {
    title: String,
    #[serde(default)]
    files: Vec<ApiFile>,
    #[serde(default)]
    dirs: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFile {
    title: String,
    #[serde(default)]
    size_bytes: u64,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    preview: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

impl SimpleApiSource {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self, ListingError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|error| ListingError::Http(error.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl DirectorySource for SimpleApiSource {
    fn name(&self) -> &str {
        "api"
    }

    fn label(&self) -> &str {
        "Simple API"
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn check_credentials(
        &self,
        _directory: &DirectoryPath,
        credentials: &Credentials,
    ) -> Result<(), ListingError> {
        if credentials.api_key.trim().is_empty() {
            return Err(ListingError::AuthenticationFailed(
                "an API key is required for this source".to_string(),
            ));
        }
        Ok(())
    }

    async fn list(
        &self,
        directory: &DirectoryPath,
        credentials: &Credentials,
    ) -> Result<FlatEntry, Vec<ListingError>> {
        let url = format!("{}/list", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("path", directory.as_str())])
            .bearer_auth(credentials.api_key.trim())
            .send()
            .await
            .map_err(|error| {
                let detail = if error.is_timeout() {
                    format!("request to {url} timed out")
                } else {
                    format!("request to {url} failed: {error}")
                };
                vec![ListingError::Unavailable(detail)]
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(vec![ListingError::AuthenticationFailed(format!(
                "the API rejected the key ({status})"
            ))]);
        }
        if !status.is_success() {
            return Err(vec![ListingError::Http(format!(
                "the API answered {status} for {}",
                directory
            ))]);
        }

        let listing: ApiListing = response
            .json()
            .await
            .map_err(|error| vec![ListingError::Decode(error.to_string())])?;
        Ok(into_flat_entry(listing, directory))
    }
}

fn into_flat_entry(listing: ApiListing, directory: &DirectoryPath) -> FlatEntry {
    let title = if listing.title.is_empty() {
        directory.basename().to_string()
    } else {
        listing.title
    };
    let mut entry = FlatEntry::new(title);
    for file in listing.files {
        let mime_type = file
            .mime_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        entry.files.push(FileEntry {
            title: file.title,
            size_bytes: file.size_bytes,
            icon_markup: file.icon.unwrap_or_else(|| {
                format!("<span class=\"icon\" data-type=\"{mime_type}\"></span>")
            }),
            preview_markup: file.preview.unwrap_or_default(),
            mime_type,
            last_modified: file.last_modified,
        });
    }
    for (path, dir_title) in listing.dirs {
        entry.push_dir(DirectoryPath::new(path), dir_title);
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_api_key_is_rejected_before_any_fetch() {
        let source = SimpleApiSource::new("https://files.example/api", 5).expect("source");
        let error = source
            .check_credentials(&DirectoryPath::new("/data/"), &Credentials::default())
            .await
            .expect_err("missing key");
        assert!(error.is_authentication());
    }

    #[test]
    fn listing_payload_maps_to_flat_entry() {
        let raw = r#"{
            "title": "data",
            "files": [
                {"title": "report.pdf", "sizeBytes": 1024, "mimeType": "application/pdf"},
                {"title": "raw.bin"}
            ],
            "dirs": {"/data/2024/": "2024", "/data/2025/": "2025"}
        }"#;
        let listing: ApiListing = serde_json::from_str(raw).expect("payload");
        let entry = into_flat_entry(listing, &DirectoryPath::new("/data/"));

        assert_eq!(entry.title, "data");
        assert_eq!(entry.files.len(), 2);
        assert_eq!(entry.files[0].mime_type, "application/pdf");
        assert_eq!(entry.files[1].mime_type, "application/octet-stream");
        let keys: Vec<_> = entry.dirs.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["/data/2024/", "/data/2025/"]);
        assert_eq!(entry.dirs[&DirectoryPath::new("/data/2024/")].title, "2024");
    }

    #[test]
    fn empty_title_falls_back_to_basename() {
        let listing = ApiListing {
            title: String::new(),
            files: Vec::new(),
            dirs: IndexMap::new(),
        };
        let entry = into_flat_entry(listing, &DirectoryPath::new("/data/reports/"));
        assert_eq!(entry.title, "reports");
    }
}

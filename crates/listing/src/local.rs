//! Local filesystem source.

use chrono::{DateTime, Utc};

use crate::entry::{FileEntry, FlatEntry};
use crate::error::ListingError;
use crate::path::DirectoryPath;
use crate::source::{Credentials, DirectorySource};

/// Lists directories of the server's own filesystem. Needs no credentials.
///
/// Paths matching one of the hide patterns are skipped silently, mirroring
/// an installation hiding its own internals from the listing.
pub struct LocalSource {
    hide: Vec<glob::Pattern>,
    preview: bool,
}

impl LocalSource {
    pub fn new(hide_globs: &[String], preview: bool) -> Result<Self, ListingError> {
        let mut hide = Vec::with_capacity(hide_globs.len());
        for raw in hide_globs {
            let pattern = glob::Pattern::new(raw)
                .map_err(|error| ListingError::InvalidInput(format!("hide pattern {raw}: {error}")))?;
            hide.push(pattern);
        }
        Ok(Self { hide, preview })
    }

    fn is_hidden(&self, path: &str) -> bool {
        self.hide.iter().any(|pattern| pattern.matches(path))
    }
}

#[async_trait::async_trait]
impl DirectorySource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    fn label(&self) -> &str {
        "Local filesystem"
    }

    async fn list(
        &self,
        directory: &DirectoryPath,
        _credentials: &Credentials,
    ) -> Result<FlatEntry, Vec<ListingError>> {
        let fs_path = directory.to_fs_path();
        let mut reader = tokio::fs::read_dir(&fs_path).await.map_err(|error| {
            vec![ListingError::Unavailable(format!(
                "cannot list {}: {error}",
                directory
            ))]
        })?;

        let mut entry = FlatEntry::new(directory.basename());
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        loop {
            let dir_entry = match reader.next_entry().await {
                Ok(Some(dir_entry)) => dir_entry,
                Ok(None) => break,
                Err(error) => {
                    return Err(vec![ListingError::Unavailable(format!(
                        "cannot read {}: {error}",
                        directory
                    ))])
                }
            };

            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let child_path = format!("{}{}", directory, name);
            if self.is_hidden(&child_path) {
                continue;
            }

            let metadata = match dir_entry.metadata().await {
                Ok(metadata) => metadata,
                Err(error) => {
                    // One unreadable entry does not fail the directory.
                    tracing::debug!(path = %child_path, %error, "skipping unreadable entry");
                    continue;
                }
            };

            if metadata.is_dir() {
                dirs.push((directory.join_dir(&name), name));
            } else {
                let mime_type = mime_type_for(&name).to_string();
                let last_modified = metadata
                    .modified()
                    .ok()
                    .map(|modified| DateTime::<Utc>::from(modified));
                let preview_markup = if self.preview && mime_type.starts_with("image/") {
                    format!("<img src=\"{}\" alt=\"\">", attr_escape(&child_path))
                } else {
                    String::new()
                };
                files.push(FileEntry {
                    title: name,
                    size_bytes: metadata.len(),
                    mime_type: mime_type.clone(),
                    last_modified,
                    preview_markup,
                    icon_markup: format!(
                        "<span class=\"icon\" data-type=\"{}\"></span>",
                        attr_escape(&mime_type)
                    ),
                });
            }
        }

        // Readdir order is platform-dependent; sort for stable output.
        files.sort_by(|a, b| a.title.cmp(&b.title));
        dirs.sort_by(|a, b| a.1.cmp(&b.1));

        entry.files = files;
        for (path, title) in dirs {
            entry.push_dir(path, title);
        }
        Ok(entry)
    }
}

/// Content type from the file extension, `application/octet-stream` when
/// unknown.
fn mime_type_for(name: &str) -> &'static str {
    let extension = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match extension.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/vnd.microsoft.icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Minimal escaping for values placed inside HTML attributes.
fn attr_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dir_path(dir: &tempfile::TempDir) -> DirectoryPath {
        DirectoryPath::new(dir.path().to_string_lossy())
    }

    #[tokio::test]
    async fn lists_files_and_directories() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("note.txt"), "hello").expect("write");
        std::fs::create_dir(dir.path().join("sub")).expect("mkdir");

        let source = LocalSource::new(&[], true).expect("source");
        let entry = source
            .list(&dir_path(&dir), &Credentials::default())
            .await
            .expect("list");

        assert_eq!(entry.files.len(), 1);
        assert_eq!(entry.files[0].title, "note.txt");
        assert_eq!(entry.files[0].mime_type, "text/plain");
        assert_eq!(entry.files[0].size_bytes, 5);
        assert!(entry.files[0].last_modified.is_some());
        assert!(entry.files[0].icon_markup.contains("text/plain"));

        assert_eq!(entry.dirs.len(), 1);
        let (key, child) = entry.dirs.first().expect("dir entry");
        assert_eq!(child.title, "sub");
        assert!(key.as_str().ends_with("/sub/"));
    }

    #[tokio::test]
    async fn honors_hide_patterns() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("visible.txt"), "a").expect("write");
        std::fs::write(dir.path().join("secret.key"), "b").expect("write");
        std::fs::create_dir(dir.path().join("private")).expect("mkdir");

        let source =
            LocalSource::new(&["*.key".to_string(), "*/private".to_string()], false).expect("source");
        let entry = source
            .list(&dir_path(&dir), &Credentials::default())
            .await
            .expect("list");

        assert_eq!(entry.files.len(), 1);
        assert_eq!(entry.files[0].title, "visible.txt");
        assert!(entry.dirs.is_empty());
    }

    #[tokio::test]
    async fn preview_markup_only_for_images_when_enabled() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("photo.png"), [0_u8; 4]).expect("write");
        std::fs::write(dir.path().join("note.txt"), "x").expect("write");

        let with_preview = LocalSource::new(&[], true).expect("source");
        let entry = with_preview
            .list(&dir_path(&dir), &Credentials::default())
            .await
            .expect("list");
        let photo = entry.files.iter().find(|f| f.title == "photo.png").expect("photo");
        let note = entry.files.iter().find(|f| f.title == "note.txt").expect("note");
        assert!(photo.preview_markup.starts_with("<img"));
        assert!(note.preview_markup.is_empty());

        let without_preview = LocalSource::new(&[], false).expect("source");
        let entry = without_preview
            .list(&dir_path(&dir), &Credentials::default())
            .await
            .expect("list");
        let photo = entry.files.iter().find(|f| f.title == "photo.png").expect("photo");
        assert!(photo.preview_markup.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_unavailable() {
        let dir = tempdir().expect("tempdir");
        let missing = DirectoryPath::new(format!("{}/gone", dir.path().to_string_lossy()));

        let source = LocalSource::new(&[], false).expect("source");
        let errors = source
            .list(&missing, &Credentials::default())
            .await
            .expect_err("missing directory");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ListingError::Unavailable(_)));
    }

    #[test]
    fn rejects_malformed_hide_pattern() {
        let result = LocalSource::new(&["[".to_string()], false);
        assert!(matches!(result, Err(ListingError::InvalidInput(_))));
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(mime_type_for("data.bin"), "application/octet-stream");
        assert_eq!(mime_type_for("no_extension"), "application/octet-stream");
        assert_eq!(mime_type_for("archive.tar"), "application/x-tar");
    }
}

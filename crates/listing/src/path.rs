use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical identifier for one directory.
///
/// Always carries a trailing separator so the same directory yields the same
/// string no matter how the client spelled it. The string doubles as the
/// cache sub-key and the adjacency key during tree assembly, so it must stay
/// stable across requests. A `file://` scheme prefix is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryPath(String);

impl DirectoryPath {
    /// Normalize a raw path: trim surrounding whitespace and ensure exactly
    /// one trailing `/`.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        let without_trailing = trimmed.trim_end_matches('/');
        if without_trailing.is_empty() {
            // Root (or scheme-less empty) collapses to a single separator.
            return Self("/".to_string());
        }
        Self(format!("{without_trailing}/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment without the trailing separator, `/` for the root.
    pub fn basename(&self) -> &str {
        let trimmed = self.0.trim_end_matches('/');
        if trimmed.is_empty() {
            return "/";
        }
        match trimmed.rfind('/') {
            Some(idx) => &trimmed[idx + 1..],
            None => trimmed,
        }
    }

    /// Child directory path under this one.
    pub fn join_dir(&self, name: &str) -> DirectoryPath {
        DirectoryPath::new(format!("{}{}", self.0, name.trim_matches('/')))
    }

    /// Filesystem form of the path: scheme prefix stripped, trailing
    /// separator kept only for the root.
    pub fn to_fs_path(&self) -> std::path::PathBuf {
        let raw = self.0.strip_prefix("file://").unwrap_or(&self.0);
        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() {
            return std::path::PathBuf::from("/");
        }
        std::path::PathBuf::from(trimmed)
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DirectoryPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_separator() {
        assert_eq!(DirectoryPath::new("/a/b").as_str(), "/a/b/");
        assert_eq!(DirectoryPath::new("/a/b/").as_str(), "/a/b/");
        assert_eq!(DirectoryPath::new("/a/b//").as_str(), "/a/b/");
        assert_eq!(DirectoryPath::new(" /a/b/ ").as_str(), "/a/b/");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = DirectoryPath::new("/srv/data");
        let twice = DirectoryPath::new(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn root_collapses_to_single_separator() {
        assert_eq!(DirectoryPath::new("/").as_str(), "/");
        assert_eq!(DirectoryPath::new("//").as_str(), "/");
        assert_eq!(DirectoryPath::new("/").basename(), "/");
    }

    #[test]
    fn basename_takes_last_segment() {
        assert_eq!(DirectoryPath::new("/a/b/").basename(), "b");
        assert_eq!(DirectoryPath::new("/a/").basename(), "a");
        assert_eq!(DirectoryPath::new("file:///srv/media/").basename(), "media");
    }

    #[test]
    fn join_dir_builds_child_path() {
        let parent = DirectoryPath::new("/a/");
        assert_eq!(parent.join_dir("b").as_str(), "/a/b/");
        assert_eq!(parent.join_dir("b/").as_str(), "/a/b/");
    }

    #[test]
    fn fs_path_strips_scheme() {
        let path = DirectoryPath::new("file:///srv/media/");
        assert_eq!(path.to_fs_path(), std::path::PathBuf::from("/srv/media"));
        assert_eq!(
            DirectoryPath::new("/srv/media/").to_fs_path(),
            std::path::PathBuf::from("/srv/media")
        );
    }

    #[test]
    fn serializes_transparently() {
        let path = DirectoryPath::new("/a/b/");
        let json = serde_json::to_string(&path).expect("serialize");
        assert_eq!(json, "\"/a/b/\"");
        let back: DirectoryPath = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, path);
    }
}

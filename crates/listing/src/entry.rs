//! Listing entry types.
//!
//! These are the result types a `DirectorySource` produces. The server crate
//! converts them to API payload types for serialization to the client.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::path::DirectoryPath;

/// One file inside a listed directory. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub title: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub last_modified: Option<DateTime<Utc>>,
    /// Pre-rendered preview markup (e.g. an `<img>` tag), empty when no
    /// preview is available.
    pub preview_markup: String,
    /// Pre-rendered icon markup for the file type.
    pub icon_markup: String,
}

/// Forward reference from a parent directory to one child directory which
/// may or may not have been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub path: DirectoryPath,
    pub title: String,
}

/// The result of listing exactly one directory, non-recursive.
///
/// `dirs` preserves the order the source produced; the crawl scheduler relies
/// on that order for its reachable-before-unreachable scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub title: String,
    pub files: Vec<FileEntry>,
    pub dirs: IndexMap<DirectoryPath, ChildRef>,
}

impl FlatEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            files: Vec::new(),
            dirs: IndexMap::new(),
        }
    }

    pub fn push_dir(&mut self, path: DirectoryPath, title: impl Into<String>) {
        let title = title.into();
        self.dirs.insert(path.clone(), ChildRef { path, title });
    }
}

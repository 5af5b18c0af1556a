//! Directory listing library.
//!
//! This crate provides the building blocks for one-directory-at-a-time
//! listing of local or remote trees:
//! - Canonical directory paths and listing entry types
//! - The `DirectorySource` capability trait and its registry
//! - Concrete sources: local filesystem, simple JSON API

pub mod api;
pub mod entry;
pub mod error;
pub mod local;
pub mod path;
pub mod registry;
pub mod source;

// Re-export main types
pub use api::SimpleApiSource;
pub use entry::{ChildRef, FileEntry, FlatEntry};
pub use error::{ListingError, Result};
pub use local::LocalSource;
pub use path::DirectoryPath;
pub use registry::SourceRegistry;
pub use source::{Credentials, DirectorySource};

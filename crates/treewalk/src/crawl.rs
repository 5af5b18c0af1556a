//! Incremental crawl engine.
//!
//! One client round-trip advances the crawl by at most one directory fetch:
//! the scheduler picks the next unfetched directory, merges its listing into
//! the session's flat map, and the orchestrator either asks the client to
//! keep polling or assembles the finished map into a tree.

use indexmap::IndexMap;
use listing::{DirectoryPath, FlatEntry};

pub mod cache;
pub mod orchestrator;
pub mod scheduler;
pub mod session;
pub mod tree;

/// Adjacency-style accumulation of one-directory-at-a-time fetch results,
/// keyed by path and insertion-ordered.
///
/// Invariant: every key was produced by exactly one successful fetch. A
/// `ChildRef` inside any entry's `dirs` may or may not yet have a
/// corresponding key (fetched vs. pending).
pub type FlatMap = IndexMap<DirectoryPath, FlatEntry>;

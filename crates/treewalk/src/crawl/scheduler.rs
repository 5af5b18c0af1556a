//! Crawl scheduler: one directory fetch per step.

use listing::{Credentials, DirectoryPath, DirectorySource, ListingError};

use crate::crawl::FlatMap;

/// Result of one scheduler step.
#[derive(Debug)]
pub struct StepOutcome {
    pub flat_map: FlatMap,
    /// True once no pending child remains or cancellation was requested.
    pub done: bool,
    /// Pending `ChildRef`s after this step, for client progress display.
    pub remaining: usize,
}

/// Advance the crawl by at most one directory fetch.
///
/// The next directory is the root when the map is empty, otherwise the first
/// `ChildRef` in insertion order whose path is not yet a key. That yields a
/// deterministic breadth-first-ish order; only reachable-before-unreachable
/// is guaranteed, not a unique total order. On a source error the map is
/// returned untouched inside the error and the caller must drop the session.
pub async fn step(
    mut flat_map: FlatMap,
    root: &DirectoryPath,
    cancel_requested: bool,
    source: &dyn DirectorySource,
    credentials: &Credentials,
) -> Result<StepOutcome, Vec<ListingError>> {
    let next = if flat_map.is_empty() {
        Some(root.clone())
    } else {
        next_pending(&flat_map)
    };

    let Some(next) = next else {
        // Nothing left to fetch: the crawl was already complete.
        return Ok(StepOutcome {
            flat_map,
            done: true,
            remaining: 0,
        });
    };

    let fetched = source.list(&next, credentials).await?;
    flat_map.insert(next, fetched);

    let remaining = remaining_count(&flat_map);
    Ok(StepOutcome {
        done: remaining == 0 || cancel_requested,
        remaining,
        flat_map,
    })
}

/// First referenced-but-unfetched directory in insertion order.
fn next_pending(flat_map: &FlatMap) -> Option<DirectoryPath> {
    for entry in flat_map.values() {
        for child in entry.dirs.values() {
            if !flat_map.contains_key(&child.path) {
                return Some(child.path.clone());
            }
        }
    }
    None
}

/// Number of `ChildRef`s across the map whose path is not yet a key.
fn remaining_count(flat_map: &FlatMap) -> usize {
    flat_map
        .values()
        .flat_map(|entry| entry.dirs.values())
        .filter(|child| !flat_map.contains_key(&child.path))
        .count()
}

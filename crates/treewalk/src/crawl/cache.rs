//! Session cache: TTL key-value store for serialized crawl snapshots.

use std::hash::Hasher;
use std::time::Duration;

use fnv::FnvHasher;
use listing::DirectoryPath;
use moka::sync::Cache;

use crate::crawl::session::Session;
use crate::error::{CrawlError, CrawlResult};

const MAX_SESSIONS: u64 = 10_000;

/// In-process TTL store for crawl sessions, partitioned by
/// `(user, root directory)`. Stores serialized JSON snapshots so an
/// abandoned crawl self-expires without explicit cleanup.
///
/// No locking: load, mutate, save is the per-request unit of work. Two
/// concurrent requests for the same key race with last-save-wins; at worst
/// one directory is fetched twice.
#[derive(Clone)]
pub struct SessionCache {
    cache: Cache<u64, String>,
}

impl SessionCache {
    pub fn new(ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();
        Self { cache }
    }

    /// Stable cache key for one user's crawl of one root directory. FNV-1a
    /// over both parts; must not vary across requests or processes.
    pub fn key(user_id: &str, root: &DirectoryPath) -> u64 {
        let mut hasher = FnvHasher::default();
        hasher.write(user_id.as_bytes());
        hasher.write(b"\0");
        hasher.write(root.as_str().as_bytes());
        hasher.finish()
    }

    /// Load a session snapshot. A snapshot that fails to deserialize is
    /// dropped and reported as absent, which restarts the crawl from an
    /// empty map.
    pub fn load(&self, key: u64) -> Option<Session> {
        let raw = self.cache.get(&key)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(%error, "corrupt session snapshot, restarting crawl");
                self.cache.invalidate(&key);
                None
            }
        }
    }

    pub fn save(&self, key: u64, session: &Session) -> CrawlResult<()> {
        let raw = serde_json::to_string(session)
            .map_err(|error| CrawlError::Internal(format!("failed to serialize session: {error}")))?;
        self.cache.insert(key, raw);
        Ok(())
    }

    pub fn clear(&self, key: u64) {
        self.cache.invalidate(&key);
    }
}

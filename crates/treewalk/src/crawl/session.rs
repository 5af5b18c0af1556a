use chrono::{DateTime, Utc};
use listing::DirectoryPath;
use serde::{Deserialize, Serialize};

use crate::crawl::FlatMap;

/// Accumulating state for one client's walk of one root directory.
///
/// Created on the first request for a given root, grown monotonically on
/// each subsequent request, destroyed on completion, cancellation, error or
/// TTL expiry — whichever comes first. Persisted between requests as a
/// serialized snapshot; the cache is unaware of crawl semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub root: DirectoryPath,
    pub flat_map: FlatMap,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, root: DirectoryPath) -> Self {
        Self {
            user_id: user_id.into(),
            root,
            flat_map: FlatMap::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_empty() {
        let session = Session::new("user-1", DirectoryPath::new("/a/"));
        assert!(session.flat_map.is_empty());
        assert_eq!(session.root.as_str(), "/a/");
    }
}

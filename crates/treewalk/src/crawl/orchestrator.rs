//! Per-request crawl coordinator.

use std::sync::Arc;

use listing::{Credentials, DirectoryPath, SourceRegistry};

use crate::crawl::cache::SessionCache;
use crate::crawl::scheduler;
use crate::crawl::session::Session;
use crate::crawl::tree::{self, TreeNode};
use crate::error::{CrawlError, CrawlResult};

/// One client round-trip of a crawl.
#[derive(Debug)]
pub struct CrawlRequest {
    pub user_id: String,
    pub root: DirectoryPath,
    pub source: String,
    pub credentials: Credentials,
    pub cancel_requested: bool,
}

/// Outcome of one round-trip: keep polling, give up, or the finished tree.
#[derive(Debug)]
pub enum CrawlResponse {
    Loading { remaining: usize },
    Errors { errors: Vec<String> },
    Complete { tree: TreeNode },
}

/// Stateless per-request coordinator. Owns nothing across requests beyond
/// the shared source registry and session cache; all crawl state lives in
/// cache snapshots keyed by `(user, root)`.
pub struct Orchestrator {
    registry: Arc<SourceRegistry>,
    cache: SessionCache,
}

impl Orchestrator {
    pub fn new(registry: Arc<SourceRegistry>, cache: SessionCache) -> Self {
        Self { registry, cache }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Advance one crawl by one round-trip: load the session, run one
    /// scheduler step, then either persist progress or assemble the tree and
    /// drop the session. Source errors also drop the session so the next
    /// attempt restarts cleanly.
    #[tracing::instrument(skip_all, fields(source = %request.source, root = %request.root))]
    pub async fn handle(&self, request: CrawlRequest) -> CrawlResult<CrawlResponse> {
        let source = self.registry.get(&request.source).ok_or_else(|| {
            CrawlError::InvalidInput(format!("unknown directory source: {}", request.source))
        })?;

        let key = SessionCache::key(&request.user_id, &request.root);

        if let Err(error) = source
            .check_credentials(&request.root, &request.credentials)
            .await
        {
            self.cache.clear(key);
            return Ok(CrawlResponse::Errors {
                errors: vec![error.to_string()],
            });
        }

        let mut session = self
            .cache
            .load(key)
            .unwrap_or_else(|| Session::new(&request.user_id, request.root.clone()));

        let outcome = match scheduler::step(
            std::mem::take(&mut session.flat_map),
            &request.root,
            request.cancel_requested,
            source.as_ref(),
            &request.credentials,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(errors) => {
                self.cache.clear(key);
                return Ok(CrawlResponse::Errors {
                    errors: errors.iter().map(|error| error.to_string()).collect(),
                });
            }
        };

        if !outcome.done {
            session.flat_map = outcome.flat_map;
            self.cache.save(key, &session)?;
            tracing::debug!(remaining = outcome.remaining, "crawl continues");
            return Ok(CrawlResponse::Loading {
                remaining: outcome.remaining,
            });
        }

        let mut node = tree::build(&outcome.flat_map, &request.root);
        if node.title.is_empty() || node.title == "/" {
            // The raw path makes a poor label for a bare root.
            node.set_title(source.label());
        }
        self.cache.clear(key);
        tracing::info!(directories = outcome.flat_map.len(), "crawl complete");
        Ok(CrawlResponse::Complete { tree: node })
    }
}

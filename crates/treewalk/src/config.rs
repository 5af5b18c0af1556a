use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CrawlError, CrawlResult};

/// Server configuration, loaded from an optional JSON file with defaults for
/// every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub listen: String,
    /// Session cache time-to-live; an abandoned crawl self-expires after
    /// this long.
    pub session_ttl_seconds: u64,
    /// Whether the local source renders preview markup for images.
    pub preview: bool,
    /// Glob patterns the local source hides from listings.
    pub hide_globs: Vec<String>,
    /// Base URL of the simple API source; the source is only registered
    /// when set.
    pub api_base_url: Option<String>,
    /// Request timeout for the simple API source.
    pub api_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
            session_ttl_seconds: 86_400,
            preview: true,
            hide_globs: Vec::new(),
            api_base_url: None,
            api_timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    /// Read the configuration file, or fall back to defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> CrawlResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|error| {
            CrawlError::InvalidInput(format!("cannot read config {}: {error}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            CrawlError::InvalidInput(format!("cannot parse config {}: {error}", path.display()))
        })
    }
}

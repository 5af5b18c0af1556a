//! Crawl endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use listing::Credentials;

use crate::crawl::orchestrator::{CrawlRequest, CrawlResponse};
use crate::crawl::tree::TreeNode;
use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;

/// Request payload for one crawl round-trip.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRequest {
    /// Root directory of the crawl, e.g. `/srv/media/` or `file:///srv/media`.
    pub root_path: String,
    /// Directory source to use. Defaults to the local filesystem.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub credentials: CredentialsPayload,
    /// Finish with whatever has been fetched instead of crawling further.
    #[serde(default)]
    pub cancel_requested: bool,
}

fn default_source() -> String {
    "local".to_string()
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsPayload {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub api_key: String,
}

impl From<CredentialsPayload> for Credentials {
    fn from(payload: CredentialsPayload) -> Self {
        Credentials {
            login: payload.login,
            password: payload.password,
            api_key: payload.api_key,
        }
    }
}

/// One file inside a directory node.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    pub title: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// RFC 3339 timestamp, absent when the source has none.
    pub last_modified: Option<String>,
    pub preview_markup: String,
    pub icon_markup: String,
}

/// Fully nested directory tree as sent to the client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreePayload {
    pub title: String,
    pub files: Vec<FilePayload>,
    #[schema(no_recursion)]
    pub dirs: IndexMap<String, TreePayload>,
}

impl From<TreeNode> for TreePayload {
    fn from(node: TreeNode) -> Self {
        Self {
            title: node.title,
            files: node
                .files
                .into_iter()
                .map(|file| FilePayload {
                    title: file.title,
                    size_bytes: file.size_bytes,
                    mime_type: file.mime_type,
                    last_modified: file.last_modified.map(|ts| ts.to_rfc3339()),
                    preview_markup: file.preview_markup,
                    icon_markup: file.icon_markup,
                })
                .collect(),
            dirs: node
                .dirs
                .into_iter()
                .map(|(path, child)| (path.as_str().to_string(), child.into()))
                .collect(),
        }
    }
}

/// Response for one crawl round-trip: keep polling, the collected errors, or
/// the finished tree.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DirectoryResponse {
    Loading { loading: bool, remaining: usize },
    Errors { errors: Vec<String> },
    Tree(TreePayload),
}

impl From<CrawlResponse> for DirectoryResponse {
    fn from(response: CrawlResponse) -> Self {
        match response {
            CrawlResponse::Loading { remaining } => DirectoryResponse::Loading {
                loading: true,
                remaining,
            },
            CrawlResponse::Errors { errors } => DirectoryResponse::Errors { errors },
            CrawlResponse::Complete { tree } => DirectoryResponse::Tree(tree.into()),
        }
    }
}

/// POST /directory
///
/// Advances the caller's crawl of `rootPath` by at most one directory fetch.
/// The client re-issues the request while the response says `loading`; the
/// session identity comes from the `x-session-id` header, so polls for the
/// same root land on the same accumulating session.
#[utoipa::path(
    post,
    path = "/directory",
    tag = "directory",
    request_body = DirectoryRequest,
    responses(
        (status = 200, description = "Crawl progress, collected errors, or the finished tree", body = DirectoryResponse),
        (status = 400, body = ApiErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn crawl_directory(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(payload): Json<DirectoryRequest>,
) -> Result<Json<DirectoryResponse>, ApiError> {
    if payload.root_path.trim().is_empty() {
        return Err(ApiError::bad_request("rootPath must not be empty"));
    }

    let user_id = match headers.get("x-session-id").and_then(|v| v.to_str().ok()) {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => {
            // Without a sticky identity each poll starts its own session;
            // only single round-trip crawls complete this way.
            let id = uuid::Uuid::new_v4().to_string();
            tracing::debug!("missing x-session-id header, using one-shot identity");
            id
        }
    };

    let request = CrawlRequest {
        user_id,
        root: listing::DirectoryPath::new(&payload.root_path),
        source: payload.source,
        credentials: payload.credentials.into(),
        cancel_requested: payload.cancel_requested,
    };

    let response = state.orchestrator.handle(request).await.map_err(ApiError::from)?;
    Ok(Json(response.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_response_serializes_with_flag() {
        let json = serde_json::to_value(DirectoryResponse::Loading {
            loading: true,
            remaining: 3,
        })
        .expect("json");
        assert_eq!(json, serde_json::json!({"loading": true, "remaining": 3}));
    }

    #[test]
    fn tree_response_serializes_as_bare_node() {
        let tree = TreePayload {
            title: "a".to_string(),
            files: Vec::new(),
            dirs: IndexMap::new(),
        };
        let json = serde_json::to_value(DirectoryResponse::Tree(tree)).expect("json");
        assert_eq!(json, serde_json::json!({"title": "a", "files": [], "dirs": {}}));
    }

    #[test]
    fn request_defaults_apply() {
        let payload: DirectoryRequest =
            serde_json::from_str(r#"{"rootPath": "/a/"}"#).expect("payload");
        assert_eq!(payload.source, "local");
        assert!(!payload.cancel_requested);
        assert!(Credentials::from(payload.credentials).is_empty());
    }
}

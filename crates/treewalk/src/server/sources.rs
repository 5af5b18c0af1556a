//! Source discovery endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::server::ServerState;

/// One registered directory source and its capability flags, enough for a
/// client to render the matching credential form.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub name: String,
    pub label: String,
    pub requires_login: bool,
    pub requires_api_key: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourcesResponse {
    pub sources: Vec<SourceInfo>,
}

/// GET /sources
///
/// Lists the registered directory sources.
#[utoipa::path(
    get,
    path = "/sources",
    tag = "directory",
    responses(
        (status = 200, description = "Registered directory sources", body = SourcesResponse),
    )
)]
pub(crate) async fn list_sources(State(state): State<Arc<ServerState>>) -> Json<SourcesResponse> {
    let sources = state
        .registry
        .list()
        .into_iter()
        .map(|source| SourceInfo {
            name: source.name().to_string(),
            label: source.label().to_string(),
            requires_login: source.requires_login(),
            requires_api_key: source.requires_api_key(),
        })
        .collect();
    Json(SourcesResponse { sources })
}

use axum::Json;
use utoipa::OpenApi;

use crate::server::directory::{
    CredentialsPayload, DirectoryRequest, DirectoryResponse, FilePayload, TreePayload,
};
use crate::server::error::{ApiErrorBody, ApiErrorResponse};
use crate::server::sources::{SourceInfo, SourcesResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Treewalk API",
        version = "0.1.0",
        description = "Incremental directory tree crawler"
    ),
    paths(
        crate::server::directory::crawl_directory,
        crate::server::sources::list_sources,
    ),
    components(schemas(
        // Error
        ApiErrorResponse,
        ApiErrorBody,
        // Directory crawl
        DirectoryRequest,
        CredentialsPayload,
        DirectoryResponse,
        TreePayload,
        FilePayload,
        // Sources
        SourcesResponse,
        SourceInfo,
    ))
)]
pub struct ApiDoc;

/// GET /openapi.json
pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

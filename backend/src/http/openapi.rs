//! OpenAPI document for the board API and the Swagger UI that renders it.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    CreatePostRequest, CreatePostResponse, DeletePostResponse, HealthResponse, ReadPostResponse,
    UpdatePostRequest, UpdatePostResponse,
};
use super::error::ApiError;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Board Mission👹",
        version = "v1",
        description = "board Mission Api 명세"
    ),
    paths(
        handlers::health_check,
        handlers::create_post,
        handlers::read_post,
        handlers::read_all_posts,
        handlers::update_post,
        handlers::delete_post,
    ),
    components(schemas(
        ApiError,
        CreatePostRequest,
        CreatePostResponse,
        DeletePostResponse,
        HealthResponse,
        ReadPostResponse,
        UpdatePostRequest,
        UpdatePostResponse,
    )),
    tags(
        (name = "posts", description = "1. 게시글 관리"),
        (name = "health", description = "Service health checks"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Build the OpenAPI document.
    pub fn build() -> utoipa::openapi::OpenApi {
        Self::openapi()
    }

    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }

    pub fn swagger_ui_path() -> &'static str {
        "/swagger-ui"
    }

    /// Swagger UI under [`ApiDoc::swagger_ui_path`], also serving the raw
    /// document at [`ApiDoc::openapi_json_path`].
    pub fn swagger_ui() -> SwaggerUi {
        SwaggerUi::new(Self::swagger_ui_path()).url(Self::openapi_json_path(), Self::build())
    }
}

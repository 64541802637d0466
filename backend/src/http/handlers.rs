//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the post
//! service. Handlers only marshal requests and responses.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::dto::{
    CreatePostRequest, CreatePostResponse, DeletePostResponse, HealthResponse, Page, PageQuery,
    PostId, ReadPostResponse, UpdatePostRequest, UpdatePostResponse,
};
use super::error::{ApiError, AppError};
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Post CRUD
// =============================================================================

/// POST /api/v1/posts
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = CreatePostResponse),
        (status = 400, description = "Malformed request body", body = ApiError)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> HandlerResult<CreatePostResponse> {
    let Json(request) = payload?;
    let response = state.post_service.create_post(request).await?;
    Ok(Json(response))
}

/// GET /api/v1/posts/{postId}
#[utoipa::path(
    get,
    path = "/api/v1/posts/{postId}",
    tag = "posts",
    params(("postId" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = ReadPostResponse),
        (status = 404, description = "No post with this id", body = ApiError)
    )
)]
pub async fn read_post(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<ReadPostResponse> {
    let Path(post_id) = post_id?;
    let response = state.post_service.read_post_by_id(PostId(post_id)).await?;
    Ok(Json(response))
}

/// GET /api/v1/posts?page=&size=
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of posts", body = Page<ReadPostResponse>),
        (status = 400, description = "Malformed query", body = ApiError)
    )
)]
pub async fn read_all_posts(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult<Page<ReadPostResponse>> {
    let Query(query) = query?;
    let request = query.to_page_request(&state.pagination);
    let page = state.post_service.read_all_posts(request).await?;
    Ok(Json(page))
}

/// PUT /api/v1/posts/{postId}
#[utoipa::path(
    put,
    path = "/api/v1/posts/{postId}",
    tag = "posts",
    params(("postId" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = UpdatePostResponse),
        (status = 400, description = "Malformed request body", body = ApiError),
        (status = 404, description = "No post with this id", body = ApiError)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> HandlerResult<UpdatePostResponse> {
    let Path(post_id) = post_id?;
    let Json(request) = payload?;
    let response = state
        .post_service
        .update_post(PostId(post_id), request)
        .await?;
    Ok(Json(response))
}

/// DELETE /api/v1/posts/{postId}
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{postId}",
    tag = "posts",
    params(("postId" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = DeletePostResponse),
        (status = 404, description = "No post with this id", body = ApiError)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<DeletePostResponse> {
    let Path(post_id) = post_id?;
    let response = state.post_service.delete_post(PostId(post_id)).await?;
    Ok(Json(response))
}

//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, the Swagger UI, middleware (CORS,
//! compression, tracing), and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::openapi::ApiDoc;
use super::state::AppState;

/// Base path of the post resource.
pub const POSTS_PATH: &str = "/api/v1/posts";

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            POSTS_PATH,
            get(handlers::read_all_posts).post(handlers::create_post),
        )
        .route(
            "/api/v1/posts/{postId}",
            get(handlers::read_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .merge(ApiDoc::swagger_ui())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

//! Data Transfer Objects for the HTTP API.
//!
//! Post request/response shapes live in [`crate::api`] and are re-exported
//! here; this module adds the HTTP-only query and health types.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub use crate::api::{
    CreatePostRequest, CreatePostResponse, DeletePostResponse, Page, PageRequest, PostId,
    ReadPostResponse, UpdatePostRequest, UpdatePostResponse,
};
use crate::config::PaginationConfig;

/// Query parameters for `GET /api/v1/posts`.
///
/// Out-of-range numbers are normalised by [`PageQuery::to_page_request`], but
/// a value that is not an integer at all (`?page=abc`) fails extraction and
/// the request is answered with 400 instead of silently using the default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number (default: 0)
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size (default: 20)
    #[serde(default)]
    pub size: Option<i64>,
}

impl PageQuery {
    /// Resolve the query into a page request.
    ///
    /// A negative page becomes 0; a missing or non-positive size becomes the
    /// configured default; a size above the configured maximum is clamped.
    pub fn to_page_request(&self, config: &PaginationConfig) -> PageRequest {
        let page = self
            .page
            .unwrap_or(0)
            .clamp(0, i64::from(u32::MAX)) as u32;

        let size = match self.size {
            Some(size) if size > 0 => size.min(i64::from(config.max_size)) as u32,
            _ => config.default_size,
        };

        PageRequest::of(page, size)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

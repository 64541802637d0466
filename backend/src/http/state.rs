//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::PaginationConfig;
use crate::db::repository::PostRepository;
use crate::services::{PostService, PostServiceImpl};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post operations used by the post handlers
    pub post_service: Arc<dyn PostService>,
    /// Repository instance, used directly only by the health check
    pub repository: Arc<dyn PostRepository>,
    /// Page size defaults for list requests
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        let post_service = Arc::new(PostServiceImpl::new(Arc::clone(&repository)));
        Self {
            post_service,
            repository,
            pagination: PaginationConfig::default(),
        }
    }

    /// Replace the post service, e.g. with a test double.
    pub fn with_post_service(mut self, post_service: Arc<dyn PostService>) -> Self {
        self.post_service = post_service;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}

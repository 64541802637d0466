//! The post entity.

use serde::{Deserialize, Serialize};

use crate::api::PostId;
use crate::db::repository::{RepositoryError, RepositoryResult};

/// A single bulletin-board entry.
///
/// `id` is `None` until the store persists the post for the first time and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<PostId>,
    pub title: String,
    pub content: String,
}

impl Post {
    /// Create a post that has not been stored yet.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Create a post with a known id, as loaded from a store.
    pub fn with_id(id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Replace title and content in place.
    pub fn replace(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }

    /// The store-assigned id, or an internal error for an unsaved post.
    pub fn require_id(&self) -> RepositoryResult<PostId> {
        self.id
            .ok_or_else(|| RepositoryError::internal("post has no id after save"))
    }
}

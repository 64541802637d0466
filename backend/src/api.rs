//! Public API surface for the board backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization and use
//! camelCase field names (`postId`, `totalElements`, ...).

use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryResult;
use crate::models::Post;

/// Post identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "http-server", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct PostId(pub i64);

impl PostId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Request body for `POST /api/v1/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "http-server", derive(utoipa::ToSchema))]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Request body for `PUT /api/v1/posts/{postId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "http-server", derive(utoipa::ToSchema))]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}

impl UpdatePostRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

macro_rules! post_response {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[cfg_attr(feature = "http-server", derive(utoipa::ToSchema))]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub post_id: PostId,
            pub title: String,
            pub content: String,
        }

        impl $name {
            pub fn new(post_id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
                Self {
                    post_id,
                    title: title.into(),
                    content: content.into(),
                }
            }

            /// Build the response from a post returned by the store.
            ///
            /// Fails with an internal error if the post was never saved.
            pub(crate) fn from_saved(post: Post) -> RepositoryResult<Self> {
                Ok(Self {
                    post_id: post.require_id()?,
                    title: post.title,
                    content: post.content,
                })
            }
        }
    };
}

post_response!(
    /// Response for a created post.
    CreatePostResponse
);

post_response!(
    /// Response for a single post lookup; also the element type of paged listings.
    ReadPostResponse
);

post_response!(
    /// Response for an updated post.
    UpdatePostResponse
);

/// Response for a deleted post. Only the id survives deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "http-server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeletePostResponse {
    pub post_id: PostId,
}

impl DeletePostResponse {
    pub fn new(post_id: PostId) -> Self {
        Self { post_id }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Create a page request. A size of zero is raised to one.
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// A bounded slice of a collection plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "http-server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page number
    pub number: u32,
    /// Requested page size
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Assemble a page from its content, the request that produced it and the
    /// total element count of the whole collection.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = total_elements.div_ceil(u64::from(size));
        let number = request.page;

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
            content,
            number,
            size,
            total_elements,
            total_pages,
        }
    }

    /// Map the content while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }

    /// Fallible variant of [`Page::map`].
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let content = self.content.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            content,
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        })
    }
}

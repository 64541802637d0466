//! Post service: maps transfer shapes to the post entity and back, enforces
//! not-found semantics and runs every mutation in one transaction.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ServiceResult;
use crate::api::{
    CreatePostRequest, CreatePostResponse, DeletePostResponse, Page, PageRequest, PostId,
    ReadPostResponse, UpdatePostRequest, UpdatePostResponse,
};
use crate::db::repository::{
    unit_of_work, PostRepository, PostStore, RepositoryError, RepositoryResult,
};
use crate::models::Post;

/// Post operations exposed to the HTTP layer.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Store a new post and echo it back with its assigned id.
    async fn create_post(&self, request: CreatePostRequest) -> ServiceResult<CreatePostResponse>;

    /// Fetch a single post.
    ///
    /// # Errors
    /// `ServiceError::NotFound` if no post has this id.
    async fn read_post_by_id(&self, post_id: PostId) -> ServiceResult<ReadPostResponse>;

    /// Fetch one page of posts in id order. Pages past the end are empty.
    async fn read_all_posts(&self, request: PageRequest) -> ServiceResult<Page<ReadPostResponse>>;

    /// Replace title and content of an existing post.
    ///
    /// # Errors
    /// `ServiceError::NotFound` if no post has this id.
    async fn update_post(
        &self,
        post_id: PostId,
        request: UpdatePostRequest,
    ) -> ServiceResult<UpdatePostResponse>;

    /// Remove a post.
    ///
    /// # Errors
    /// `ServiceError::NotFound` if no post has this id.
    async fn delete_post(&self, post_id: PostId) -> ServiceResult<DeletePostResponse>;
}

/// [`PostService`] backed by a [`PostRepository`].
#[derive(Clone)]
pub struct PostServiceImpl {
    repository: Arc<dyn PostRepository>,
}

impl PostServiceImpl {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }
}

fn find_existing(
    store: &mut dyn PostStore,
    post_id: PostId,
    operation: &'static str,
) -> RepositoryResult<Post> {
    store
        .find_by_id(post_id)?
        .ok_or_else(|| RepositoryError::post_not_found(post_id).in_operation(operation))
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn create_post(&self, request: CreatePostRequest) -> ServiceResult<CreatePostResponse> {
        debug!(title = %request.title, "creating post");

        let CreatePostRequest { title, content } = request;
        let saved = self
            .repository
            .in_transaction(unit_of_work(move |store| store.save(Post::new(title, content))))
            .await?;

        let response = CreatePostResponse::from_saved(saved)?;
        info!(post_id = %response.post_id, "post created");
        Ok(response)
    }

    async fn read_post_by_id(&self, post_id: PostId) -> ServiceResult<ReadPostResponse> {
        debug!(%post_id, "reading post");

        let post = self
            .repository
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::post_not_found(post_id).in_operation("read_post_by_id")
            })?;

        Ok(ReadPostResponse::from_saved(post)?)
    }

    async fn read_all_posts(&self, request: PageRequest) -> ServiceResult<Page<ReadPostResponse>> {
        debug!(page = request.page, size = request.size, "reading post page");

        let page = self.repository.find_all(request).await?;
        Ok(page.try_map(ReadPostResponse::from_saved)?)
    }

    async fn update_post(
        &self,
        post_id: PostId,
        request: UpdatePostRequest,
    ) -> ServiceResult<UpdatePostResponse> {
        debug!(%post_id, "updating post");

        let UpdatePostRequest { title, content } = request;
        let updated = self
            .repository
            .in_transaction(unit_of_work(move |store| {
                let mut post = find_existing(store, post_id, "update_post")?;
                post.replace(title, content);
                store.save(post)
            }))
            .await?;

        info!(%post_id, "post updated");
        Ok(UpdatePostResponse::from_saved(updated)?)
    }

    async fn delete_post(&self, post_id: PostId) -> ServiceResult<DeletePostResponse> {
        debug!(%post_id, "deleting post");

        self.repository
            .in_transaction(unit_of_work(move |store| {
                let post = find_existing(store, post_id, "delete_post")?;
                if !store.delete_by_id(post_id)? {
                    return Err(
                        RepositoryError::post_not_found(post_id).in_operation("delete_post")
                    );
                }
                Ok(post)
            }))
            .await?;

        info!(%post_id, "post deleted");
        Ok(DeletePostResponse::new(post_id))
    }
}

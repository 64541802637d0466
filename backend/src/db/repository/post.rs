//! Post repository traits.
//!
//! Two views of the same store:
//!
//! - [`PostStore`] is the synchronous unit-of-work view. Every call made
//!   through one `&mut dyn PostStore` belongs to a single transaction.
//! - [`PostRepository`] is the async, shareable handle used by the service
//!   layer. Reads run as single-query snapshots; writes are grouped with
//!   [`PostRepository::in_transaction`].

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Page, PageRequest, PostId};
use crate::models::Post;

/// Work executed inside one store transaction.
///
/// Returning `Ok` commits every effect made through the store; returning
/// `Err` rolls all of them back.
pub type UnitOfWork = Box<dyn FnOnce(&mut dyn PostStore) -> RepositoryResult<Post> + Send>;

/// Box a closure as a [`UnitOfWork`].
pub fn unit_of_work<F>(work: F) -> UnitOfWork
where
    F: FnOnce(&mut dyn PostStore) -> RepositoryResult<Post> + Send + 'static,
{
    Box::new(work)
}

/// Store operations available inside a transaction.
pub trait PostStore {
    /// Insert a post without an id (assigning one) or overwrite the title and
    /// content of an existing one.
    ///
    /// # Returns
    /// * `Ok(Post)` - The stored post, id always set
    /// * `Err(RepositoryError::NotFound)` - If the post has an id the store does not know
    fn save(&mut self, post: Post) -> RepositoryResult<Post>;

    /// Look up a post by id.
    fn find_by_id(&mut self, id: PostId) -> RepositoryResult<Option<Post>>;

    /// Read one page of posts in ascending id order.
    fn find_all(&mut self, request: PageRequest) -> RepositoryResult<Page<Post>>;

    /// Remove a post.
    ///
    /// # Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No post had this id
    fn delete_by_id(&mut self, id: PostId) -> RepositoryResult<bool>;
}

/// Repository trait for post persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Look up a post by id outside of any write transaction.
    async fn find_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>>;

    /// Read one page of posts outside of any write transaction.
    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Post>>;

    /// Run `work` atomically and return the post it produced.
    async fn in_transaction(&self, work: UnitOfWork) -> RepositoryResult<Post>;
}

//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the post repository
//! suitable for unit testing and local development. All data is stored in a
//! `BTreeMap` keyed by id, so iteration order is insertion order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{Page, PageRequest, PostId};
use crate::db::repository::*;
use crate::models::Post;

/// In-memory local repository.
///
/// A unit of work mutates the live map directly under the write lock and
/// records an undo step per change; a failed unit replays those steps in
/// reverse. Rollback therefore costs only what the unit touched.
///
/// # Example
/// ```
/// use board::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.post_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    posts: BTreeMap<PostId, Post>,
    // Never rolled back, so ids are not handed out twice.
    next_post_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            posts: BTreeMap::new(),
            next_post_id: 1,
            is_healthy: true,
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all posts. The id counter is kept.
    pub fn clear(&self) {
        self.data.write().posts.clear();
    }

    /// Get the number of posts stored.
    pub fn post_count(&self) -> usize {
        self.data.read().posts.len()
    }

    fn ensure_healthy(data: &LocalData, operation: &'static str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::unavailable("local repository is marked unhealthy")
                .in_operation(operation))
        }
    }
}

fn page_of(posts: &BTreeMap<PostId, Post>, request: PageRequest) -> Page<Post> {
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let content = posts
        .values()
        .skip(offset)
        .take(request.size as usize)
        .cloned()
        .collect();
    Page::new(content, request, posts.len() as u64)
}

enum Undo {
    Remove(PostId),
    Restore(PostId, Post),
}

/// Store view handed to one unit of work. Dropping it without
/// [`LocalTransaction::commit`] undoes its writes, including on panic.
struct LocalTransaction<'a> {
    posts: &'a mut BTreeMap<PostId, Post>,
    next_post_id: &'a mut i64,
    undo: Vec<Undo>,
}

impl LocalTransaction<'_> {
    fn commit(mut self) {
        self.undo.clear();
    }
}

impl Drop for LocalTransaction<'_> {
    fn drop(&mut self) {
        while let Some(step) = self.undo.pop() {
            match step {
                Undo::Remove(id) => {
                    self.posts.remove(&id);
                }
                Undo::Restore(id, post) => {
                    self.posts.insert(id, post);
                }
            }
        }
    }
}

impl PostStore for LocalTransaction<'_> {
    fn save(&mut self, mut post: Post) -> RepositoryResult<Post> {
        match post.id {
            Some(id) => {
                let stored = self
                    .posts
                    .get_mut(&id)
                    .ok_or_else(|| RepositoryError::post_not_found(id).in_operation("save"))?;
                let previous = std::mem::replace(stored, post.clone());
                self.undo.push(Undo::Restore(id, previous));
                Ok(post)
            }
            None => {
                let id = PostId(*self.next_post_id);
                *self.next_post_id += 1;
                post.id = Some(id);
                self.posts.insert(id, post.clone());
                self.undo.push(Undo::Remove(id));
                Ok(post)
            }
        }
    }

    fn find_by_id(&mut self, id: PostId) -> RepositoryResult<Option<Post>> {
        Ok(self.posts.get(&id).cloned())
    }

    fn find_all(&mut self, request: PageRequest) -> RepositoryResult<Page<Post>> {
        Ok(page_of(self.posts, request))
    }

    fn delete_by_id(&mut self, id: PostId) -> RepositoryResult<bool> {
        match self.posts.remove(&id) {
            Some(removed) => {
                self.undo.push(Undo::Restore(id, removed));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl PostRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn find_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "find_by_id")?;
        Ok(data.posts.get(&id).cloned())
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Post>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "find_all")?;
        Ok(page_of(&data.posts, request))
    }

    async fn in_transaction(&self, work: UnitOfWork) -> RepositoryResult<Post> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "in_transaction")?;

        let LocalData {
            posts,
            next_post_id,
            ..
        } = &mut *data;
        let mut tx = LocalTransaction {
            posts,
            next_post_id,
            undo: Vec::new(),
        };

        let post = work(&mut tx)?;
        tx.commit();
        Ok(post)
    }
}

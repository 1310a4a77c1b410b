use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, BlogPostPatch};
use crate::error::RepoError;

/// Generic repository trait defining the per-document operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Fails with `RepoError::Constraint` if the id is taken.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, reporting whether anything was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Document-store client for blog posts.
#[async_trait]
pub trait BlogPostRepository: BaseRepository<BlogPost, Uuid> {
    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Every stored post, in whatever order the store returns them.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Any one stored post.
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError>;

    /// Bulk insert, returning how many posts were written.
    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<u64, RepoError>;

    /// Apply a partial update. `RepoError::NotFound` if `id` is not stored.
    async fn update(&self, id: Uuid, patch: BlogPostPatch) -> Result<BlogPost, RepoError>;

    /// Remove every post, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}

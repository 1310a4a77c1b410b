//! In-memory document store - used when no database URL is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogpost_core::domain::{BlogPost, BlogPostPatch};
use blogpost_core::error::RepoError;
use blogpost_core::ports::{BaseRepository, BlogPostRepository};

/// Blog posts held in insertion order behind an async RwLock.
///
/// Data is lost on process restart.
pub struct InMemoryBlogPostRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryBlogPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryBlogPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryBlogPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!(
                "blog post {} already exists",
                post.id
            )));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.posts.read().await.first().cloned())
    }

    async fn insert_many(&self, batch: Vec<BlogPost>) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;

        // All or nothing, like a single multi-row INSERT.
        for (i, post) in batch.iter().enumerate() {
            let clashes = posts.iter().chain(&batch[..i]).any(|p| p.id == post.id);
            if clashes {
                return Err(RepoError::Constraint(format!(
                    "blog post {} already exists",
                    post.id
                )));
            }
        }

        let inserted = batch.len() as u64;
        posts.extend(batch);
        Ok(inserted)
    }

    async fn update(&self, id: Uuid, patch: BlogPostPatch) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.apply(&patch);
        Ok(post.clone())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        Ok(removed)
    }
}

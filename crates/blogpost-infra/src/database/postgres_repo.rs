//! PostgreSQL blog post store.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    SqlErr,
};
use uuid::Uuid;

use blogpost_core::domain::{BlogPost, BlogPostPatch};
use blogpost_core::error::RepoError;
use blogpost_core::ports::{BaseRepository, BlogPostRepository};

use super::entity::blog_post::{self, ActiveModel, Entity as BlogPostEntity, into_active_models};

/// Blog post store over a SeaORM connection.
pub struct PostgresBlogPostRepository {
    db: Arc<DbConn>,
}

impl PostgresBlogPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    fn conn(&self) -> &DbConn {
        self.db.as_ref()
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
        return RepoError::Constraint(msg);
    }
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for PostgresBlogPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        tracing::debug!(post_id = %id, "Finding blog post by id");

        BlogPostEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(map_db_err)?
            .map(BlogPost::try_from)
            .transpose()
    }

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        tracing::debug!(post_id = %post.id, "Inserting blog post");

        let model = ActiveModel::try_from(post)?
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        BlogPost::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = BlogPostEntity::delete_by_id(id)
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %id, removed = result.rows_affected, "Deleted blog post");
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn count(&self) -> Result<u64, RepoError> {
        BlogPostEntity::find()
            .count(self.conn())
            .await
            .map_err(map_db_err)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let models = BlogPostEntity::find()
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = models.len(), "Loaded blog posts");
        models.into_iter().map(BlogPost::try_from).collect()
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        BlogPostEntity::find()
            .one(self.conn())
            .await
            .map_err(map_db_err)?
            .map(BlogPost::try_from)
            .transpose()
    }

    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<u64, RepoError> {
        if posts.is_empty() {
            return Ok(0);
        }

        let models = into_active_models(posts)?;
        let inserted = BlogPostEntity::insert_many(models)
            .exec_without_returning(self.conn())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(inserted, "Bulk inserted blog posts");
        Ok(inserted)
    }

    async fn update(&self, id: Uuid, patch: BlogPostPatch) -> Result<BlogPost, RepoError> {
        if patch.is_empty() {
            return self.find_by_id(id).await?.ok_or(RepoError::NotFound);
        }

        let mut query = BlogPostEntity::update_many().filter(blog_post::Column::Id.eq(id));
        if let Some(title) = patch.title {
            query = query.col_expr(blog_post::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            query = query.col_expr(blog_post::Column::Content, Expr::value(content));
        }

        // UPDATE .. RETURNING: the row comes back from the same statement.
        let model = query
            .exec_with_returning(self.conn())
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)?;

        tracing::debug!(post_id = %id, "Updated blog post");
        BlogPost::try_from(model)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = BlogPostEntity::delete_many()
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        tracing::warn!(removed = result.rows_affected, "Deleted all blog posts");
        Ok(result.rows_affected)
    }
}

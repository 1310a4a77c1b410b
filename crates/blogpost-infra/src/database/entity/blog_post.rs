//! Blog post entity for SeaORM. The author is kept as a JSONB document.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blogpost_core::domain::{Author, BlogPost};
use blogpost_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub author: Json,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Stored row to domain post. Fails if the author document lost its shape.
impl TryFrom<Model> for BlogPost {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let author: Author =
            serde_json::from_value(model.author).map_err(|e| RepoError::CorruptDocument {
                id: model.id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id: model.id,
            author,
            title: model.title,
            content: model.content,
            created: model.created.into(),
        })
    }
}

/// Domain post to a fully-set ActiveModel, ready for insert.
impl TryFrom<BlogPost> for ActiveModel {
    type Error = RepoError;

    fn try_from(post: BlogPost) -> Result<Self, Self::Error> {
        let author = serde_json::to_value(&post.author).map_err(|e| RepoError::CorruptDocument {
            id: post.id,
            reason: e.to_string(),
        })?;

        Ok(Self {
            id: Set(post.id),
            author: Set(author),
            title: Set(post.title),
            content: Set(post.content),
            created: Set(post.created.into()),
        })
    }
}

/// Convert a batch of domain posts, stopping at the first one that cannot be encoded.
pub(crate) fn into_active_models(posts: Vec<BlogPost>) -> Result<Vec<ActiveModel>, RepoError> {
    posts.into_iter().map(ActiveModel::try_from).collect()
}

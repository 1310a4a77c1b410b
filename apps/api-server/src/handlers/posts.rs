//! Blog post resource: list, fetch, create, update, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogpost_core::domain::{BlogPost, BlogPostPatch};
use blogpost_core::ports::{BaseRepository, BlogPostRepository};
use blogpost_shared::dto::{BlogPostView, CreatePostRequest, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let views: Vec<BlogPostView> = posts.iter().map(BlogPost::to_view).collect();

    tracing::debug!(count = views.len(), "Listing blog posts");
    Ok(HttpResponse::Ok().json(views))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(post.to_view()))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = BlogPost::try_from(body.into_inner())?;
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, "Created blog post");
    Ok(HttpResponse::Created().json(saved.to_view()))
}

/// PUT /posts/{id}
///
/// Applies `title` and `content` if present. A body `id`, when sent, must
/// match the path.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = req.id.as_deref() {
        if Uuid::parse_str(body_id).ok() != Some(id) {
            return Err(AppError::BadRequest(format!(
                "Request path id ({}) and request body id ({}) must match",
                id, body_id
            )));
        }
    }

    let patch = BlogPostPatch::try_from(req)?;
    let updated = state.posts.update(id, patch).await.map_err(|e| match e {
        blogpost_core::RepoError::NotFound => not_found(id),
        other => other.into(),
    })?;

    tracing::info!(post_id = %updated.id, title = %updated.title, "Updated blog post");
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
///
/// 204 whether or not the post existed.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state.posts.delete(id).await?;

    if removed {
        tracing::info!(post_id = %id, "Deleted blog post");
    } else {
        tracing::debug!(post_id = %id, "Delete of absent blog post");
    }
    Ok(HttpResponse::NoContent().finish())
}

fn not_found(id: Uuid) -> AppError {
    blogpost_core::DomainError::NotFound {
        entity_type: "BlogPost",
        id,
    }
    .into()
}

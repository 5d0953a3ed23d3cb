//! Post collection handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use purpleit_core::DomainError;
use purpleit_core::domain::{Post, PostEdit, normalize_title};
use purpleit_shared::dto::{CreatePostRequest, DeletePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts - every post, newest first.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let title = required_title(&req.title)?;
    if req.secret.trim().is_empty() {
        return Err(DomainError::Validation("Secret key is required".to_string()).into());
    }

    let secret_hash = state.secrets.hash(&req.secret)?;
    let post = Post::new(req.id, title, req.content, req.image_url, secret_hash);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, "Post created");
    Ok(HttpResponse::Created().json(PostResponse::from(saved)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /api/posts/{id} - secret-gated edit.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut post = find_post(&state, path.into_inner()).await?;

    verify_secret(&state, &post, &req.secret)?;
    let title = required_title(&req.title)?;

    post.apply_edit(
        PostEdit {
            title,
            content: req.content,
            image_url: req.image_url,
        },
        chrono::Utc::now(),
    );
    let saved = state.posts.update(post).await?;

    tracing::info!(post_id = %saved.id, "Post edited");
    Ok(HttpResponse::Ok().json(PostResponse::from(saved)))
}

/// POST /api/posts/{id}/upvote
pub async fn upvote_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.increment_upvotes(path.into_inner()).await?;

    tracing::debug!(post_id = %post.id, upvotes = post.upvotes, "Post upvoted");
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id} - secret passed in the JSON body.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<DeletePostRequest>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    verify_secret(&state, &post, &body.secret)?;

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub(super) async fn find_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state.posts.find_by_id(id).await?.ok_or_else(|| {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
        .into()
    })
}

fn required_title(title: &str) -> AppResult<String> {
    normalize_title(title)
        .map(str::to_string)
        .ok_or_else(|| DomainError::Validation("Title is required".to_string()).into())
}

fn verify_secret(state: &AppState, post: &Post, entered: &str) -> AppResult<()> {
    if state.secrets.verify(entered, &post.secret_hash)? {
        return Ok(());
    }

    tracing::warn!(post_id = %post.id, "Secret key mismatch");
    Err(DomainError::SecretMismatch.into())
}

//! Comment collection handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use purpleit_core::DomainError;
use purpleit_core::domain::NewComment;
use purpleit_shared::dto::{CommentResponse, CreateCommentRequest};

use super::posts::find_post;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/{id}/comments - newest first.
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.comments.list_for_post(path.into_inner()).await?;

    let body: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;

    let text = body.comment.trim();
    if text.is_empty() {
        return Err(DomainError::Validation("Comment must not be empty".to_string()).into());
    }

    let stored = state
        .comments
        .insert(NewComment::new(post.id, text.to_string()))
        .await?;

    tracing::info!(post_id = %post.id, comment_id = stored.id, "Comment added");
    Ok(HttpResponse::Created().json(CommentResponse::from(stored)))
}

//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use purpleit_core::domain::{Comment, Post};

/// Request to create a post. The client chooses the ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub secret: String,
}

/// Request to edit a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub secret: String,
}

/// Request to delete a post. The secret travels in the body so any UTF-8
/// secret accepted at creation can also delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostRequest {
    pub secret: String,
}

/// Request to add a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: String,
}

/// A post as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub upvotes: i64,
    /// Public on purpose: clients check an entered secret against it before
    /// sending a mutation.
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A comment as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            upvotes: post.upvotes,
            secret_hash: post.secret_hash,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostResponse> for Post {
    fn from(res: PostResponse) -> Self {
        Self {
            id: res.id,
            title: res.title,
            content: res.content,
            image_url: res.image_url,
            upvotes: res.upvotes,
            secret_hash: res.secret_hash,
            created_at: res.created_at,
            updated_at: res.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            comment: comment.comment,
            created_at: comment.created_at,
        }
    }
}

impl From<CommentResponse> for Comment {
    fn from(res: CommentResponse) -> Self {
        Self {
            id: res.id,
            post_id: res.post_id,
            comment: res.comment,
            created_at: res.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_optional_fields_default() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"id":"{id}","title":"Hello","secret":"s3cret"}}"#);

        let req: CreatePostRequest = serde_json::from_str(&body).unwrap();

        assert_eq!(req.id, id);
        assert_eq!(req.content, None);
        assert_eq!(req.image_url, None);
    }

    #[test]
    fn test_delete_request_keeps_non_ascii_secret() {
        let body = serde_json::to_string(&DeletePostRequest {
            secret: "clé".to_string(),
        })
        .unwrap();

        let req: DeletePostRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(req.secret, "clé");
    }
}

//! Data access facade over the `posts` and `comments` collections.
//!
//! Pure pass-through: no validation or business rules live here.

use async_trait::async_trait;
use uuid::Uuid;

use purpleit_core::domain::{Comment, Post};
use purpleit_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::error::ApiError;

#[async_trait]
pub trait BoardApi: Send + Sync {
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// One post, or `None` when no post has this ID.
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, ApiError>;

    async fn create_post(&self, req: CreatePostRequest) -> Result<Post, ApiError>;

    async fn update_post(&self, id: Uuid, req: UpdatePostRequest) -> Result<Post, ApiError>;

    /// Add one upvote and return the post as the backend now stores it.
    async fn upvote_post(&self, id: Uuid) -> Result<Post, ApiError>;

    async fn delete_post(&self, id: Uuid, secret: &str) -> Result<(), ApiError>;

    /// Comments for a post, newest first.
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, ApiError>;

    async fn create_comment(&self, post_id: Uuid, text: &str) -> Result<Comment, ApiError>;
}

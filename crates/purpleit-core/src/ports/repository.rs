use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, NewComment, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Fails with `Constraint` if the ID is taken.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is missing.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Atomically add one upvote and return the updated post.
    async fn increment_upvotes(&self, id: Uuid) -> Result<Post, RepoError>;
}

/// Comment repository. Comments are append-only.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments for a post, newest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Store a comment and return it with its assigned ID.
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError>;
}

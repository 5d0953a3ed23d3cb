//! In-memory `BoardApi` for view tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use purpleit_core::domain::{Comment, NewComment, Post, PostEdit};
use purpleit_core::error::RepoError;
use purpleit_core::ports::{
    BaseRepository, CommentRepository, PostRepository, SecretError, SecretService,
};
use purpleit_infra::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryStore};
use purpleit_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::api::BoardApi;
use crate::error::ApiError;

/// Secret every seeded post is created with.
pub const SECRET: &str = "hunter2";

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainSecrets;

impl SecretService for PlainSecrets {
    fn hash(&self, secret: &str) -> Result<String, SecretError> {
        Ok(format!("plain:{secret}"))
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, SecretError> {
        let stored = hash
            .strip_prefix("plain:")
            .ok_or_else(|| SecretError::MalformedHash(hash.to_string()))?;
        Ok(stored == secret)
    }
}

pub fn secrets() -> Arc<dyn SecretService> {
    Arc::new(PlainSecrets)
}

/// Backend double that records every call and can be told to fail.
pub struct FakeApi {
    posts: InMemoryPostRepository,
    comments: InMemoryCommentRepository,
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        let store = InMemoryStore::new();
        Arc::new(Self {
            posts: store.posts(),
            comments: store.comments(),
            calls: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
        })
    }

    /// Number of times `method` has been called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    /// Make every later call to `method` fail with a 500.
    pub fn fail_on(&self, method: &'static str) {
        self.failing.lock().unwrap().insert(method);
    }

    pub async fn stored(&self, id: Uuid) -> Option<Post> {
        self.posts.find_by_id(id).await.unwrap()
    }

    pub async fn stored_comments(&self, post_id: Uuid) -> Vec<Comment> {
        self.comments.list_for_post(post_id).await.unwrap()
    }

    fn record(&self, method: &'static str) -> Result<(), ApiError> {
        *self.calls.lock().unwrap().entry(method).or_default() += 1;

        if self.failing.lock().unwrap().contains(method) {
            return Err(ApiError::Status {
                status: 500,
                detail: format!("{method} failed"),
            });
        }
        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Post, ApiError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(repo_err)?
            .ok_or(ApiError::NotFound)
    }

    fn check_secret(post: &Post, secret: &str) -> Result<(), ApiError> {
        match PlainSecrets.verify(secret, &post.secret_hash) {
            Ok(true) => Ok(()),
            _ => Err(ApiError::SecretMismatch),
        }
    }
}

fn repo_err(e: RepoError) -> ApiError {
    match e {
        RepoError::NotFound => ApiError::NotFound,
        other => ApiError::Status {
            status: 500,
            detail: other.to_string(),
        },
    }
}

/// Store a post created `age` ago, bypassing the call log.
pub async fn seed_post(api: &FakeApi, title: &str, upvotes: i64, age: TimeDelta) -> Post {
    let mut post = Post::new(
        Uuid::new_v4(),
        title.to_string(),
        None,
        None,
        PlainSecrets.hash(SECRET).unwrap(),
    );
    post.upvotes = upvotes;
    post.created_at = Utc::now() - age;
    api.posts.insert(post).await.unwrap()
}

/// Store a comment written `age` ago, bypassing the call log.
pub async fn seed_comment(api: &FakeApi, post_id: Uuid, text: &str, age: TimeDelta) -> Comment {
    let mut comment = NewComment::new(post_id, text.to_string());
    comment.created_at = Utc::now() - age;
    api.comments.insert(comment).await.unwrap()
}

#[async_trait]
impl BoardApi for FakeApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.record("list_posts")?;
        self.posts.list_recent().await.map_err(repo_err)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        self.record("get_post")?;
        self.posts.find_by_id(id).await.map_err(repo_err)
    }

    async fn create_post(&self, req: CreatePostRequest) -> Result<Post, ApiError> {
        self.record("create_post")?;
        let hash = PlainSecrets.hash(&req.secret).map_err(|e| ApiError::Status {
            status: 500,
            detail: e.to_string(),
        })?;
        let post = Post::new(req.id, req.title.trim().to_string(), req.content, req.image_url, hash);
        self.posts.insert(post).await.map_err(repo_err)
    }

    async fn update_post(&self, id: Uuid, req: UpdatePostRequest) -> Result<Post, ApiError> {
        self.record("update_post")?;
        let mut post = self.require(id).await?;
        Self::check_secret(&post, &req.secret)?;

        post.apply_edit(
            PostEdit {
                title: req.title.trim().to_string(),
                content: req.content,
                image_url: req.image_url,
            },
            Utc::now(),
        );
        self.posts.update(post).await.map_err(repo_err)
    }

    async fn upvote_post(&self, id: Uuid) -> Result<Post, ApiError> {
        self.record("upvote_post")?;
        self.posts.increment_upvotes(id).await.map_err(repo_err)
    }

    async fn delete_post(&self, id: Uuid, secret: &str) -> Result<(), ApiError> {
        self.record("delete_post")?;
        let post = self.require(id).await?;
        Self::check_secret(&post, secret)?;
        self.posts.delete(id).await.map_err(repo_err)
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, ApiError> {
        self.record("list_comments")?;
        self.comments.list_for_post(post_id).await.map_err(repo_err)
    }

    async fn create_comment(&self, post_id: Uuid, text: &str) -> Result<Comment, ApiError> {
        self.record("create_comment")?;
        self.require(post_id).await?;
        self.comments
            .insert(NewComment::new(post_id, text.to_string()))
            .await
            .map_err(repo_err)
    }
}

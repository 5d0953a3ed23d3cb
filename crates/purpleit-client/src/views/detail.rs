//! A single post with its comments, upvote and delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use purpleit_core::domain::{Comment, Post};
use purpleit_core::ports::SecretService;
use purpleit_core::time::format_relative;

use crate::api::BoardApi;
use crate::error::ApiError;
use crate::notice::{self, Notice};
use crate::request_seq::{RequestSeq, Ticket};
use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostState {
    Loading,
    Loaded(Post),
    NotFound,
}

/// An upvote in flight, with the count to restore if it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpvoteTicket {
    pub post_id: Uuid,
    pub previous: i64,
}

/// A delete that passed the local secret check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub post_id: Uuid,
    pub secret: String,
}

pub struct DetailView {
    api: Arc<dyn BoardApi>,
    secrets: Arc<dyn SecretService>,
    post_id: Uuid,
    post: PostState,
    comments: Vec<Comment>,
    post_seq: RequestSeq,
    comments_seq: RequestSeq,
    upvoting: bool,
    delete_open: bool,
    delete_secret: String,
    deleting: bool,
    comment_input: String,
    commenting: bool,
    image_failed: bool,
    notice: Option<Notice>,
}

impl DetailView {
    pub fn new(api: Arc<dyn BoardApi>, secrets: Arc<dyn SecretService>, post_id: Uuid) -> Self {
        Self {
            api,
            secrets,
            post_id,
            post: PostState::Loading,
            comments: Vec::new(),
            post_seq: RequestSeq::new(),
            comments_seq: RequestSeq::new(),
            upvoting: false,
            delete_open: false,
            delete_secret: String::new(),
            deleting: false,
            comment_input: String::new(),
            commenting: false,
            image_failed: false,
            notice: None,
        }
    }

    /// Fetch the post and its comments side by side.
    pub async fn enter(&mut self) {
        let post_ticket = self.begin_load_post();
        let comments_ticket = self.begin_load_comments();

        let api = Arc::clone(&self.api);
        let (post, comments) = tokio::join!(
            api.get_post(self.post_id),
            api.list_comments(self.post_id)
        );

        self.finish_load_post(post_ticket, post);
        self.finish_load_comments(comments_ticket, comments);
    }

    pub fn begin_load_post(&mut self) -> Ticket {
        self.post = PostState::Loading;
        self.image_failed = false;
        self.post_seq.next()
    }

    pub fn finish_load_post(&mut self, ticket: Ticket, result: Result<Option<Post>, ApiError>) {
        if !self.post_seq.is_current(ticket) {
            tracing::debug!(post_id = %self.post_id, "Discarding stale post");
            return;
        }

        self.post = match result {
            Ok(Some(post)) => PostState::Loaded(post),
            Ok(None) => PostState::NotFound,
            Err(e) => {
                tracing::error!(post_id = %self.post_id, error = %e, "Failed to load post");
                self.notice = Some(Notice::error(notice::LOAD_POST_FAILED));
                PostState::NotFound
            }
        };
    }

    pub fn begin_load_comments(&mut self) -> Ticket {
        self.comments_seq.next()
    }

    pub fn finish_load_comments(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Comment>, ApiError>,
    ) {
        if !self.comments_seq.is_current(ticket) {
            tracing::debug!(post_id = %self.post_id, "Discarding stale comments");
            return;
        }

        match result {
            Ok(comments) => self.comments = comments,
            Err(e) => {
                tracing::error!(post_id = %self.post_id, error = %e, "Failed to load comments");
                self.notice = Some(Notice::error(notice::LOAD_COMMENTS_FAILED));
            }
        }
    }

    // Upvote

    /// Bump the displayed count. Returns `None` while another upvote is in
    /// flight or before the post has loaded.
    pub fn begin_upvote(&mut self) -> Option<UpvoteTicket> {
        if self.upvoting {
            return None;
        }
        let PostState::Loaded(post) = &mut self.post else {
            return None;
        };

        let ticket = UpvoteTicket {
            post_id: post.id,
            previous: post.upvotes,
        };
        post.upvotes += 1;
        self.upvoting = true;
        Some(ticket)
    }

    /// Take the stored count on success, restore the previous one on failure.
    pub fn finish_upvote(&mut self, ticket: UpvoteTicket, result: Result<Post, ApiError>) {
        self.upvoting = false;

        let count = match result {
            Ok(stored) => stored.upvotes,
            Err(e) => {
                tracing::error!(post_id = %ticket.post_id, error = %e, "Failed to upvote post");
                self.notice = Some(Notice::error(notice::UPVOTE_FAILED));
                ticket.previous
            }
        };

        if let PostState::Loaded(post) = &mut self.post {
            if post.id == ticket.post_id {
                post.upvotes = count;
            }
        }
    }

    pub async fn upvote(&mut self) {
        let Some(ticket) = self.begin_upvote() else {
            return;
        };
        let result = self.api.upvote_post(ticket.post_id).await;
        self.finish_upvote(ticket, result);
    }

    pub fn is_upvoting(&self) -> bool {
        self.upvoting
    }

    // Delete

    pub fn open_delete(&mut self) {
        self.delete_open = true;
    }

    pub fn close_delete(&mut self) {
        self.delete_open = false;
        self.delete_secret.clear();
    }

    pub fn is_delete_open(&self) -> bool {
        self.delete_open
    }

    pub fn set_delete_secret(&mut self, secret: impl Into<String>) {
        self.delete_secret = secret.into();
    }

    pub fn can_confirm_delete(&self) -> bool {
        !self.delete_secret.trim().is_empty() && !self.deleting
    }

    /// Check the entered secret against the post before any backend call.
    pub fn begin_delete(&mut self) -> Option<DeleteRequest> {
        if !self.can_confirm_delete() {
            return None;
        }
        let PostState::Loaded(post) = &self.post else {
            return None;
        };

        match self.secrets.verify(&self.delete_secret, &post.secret_hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(post_id = %post.id, "Secret key mismatch on delete");
                self.notice = Some(Notice::error(notice::SECRET_MISMATCH));
                return None;
            }
            Err(e) => {
                tracing::error!(post_id = %post.id, error = %e, "Cannot verify secret key");
                self.notice = Some(Notice::error(notice::SECRET_MISMATCH));
                return None;
            }
        }

        self.deleting = true;
        Some(DeleteRequest {
            post_id: post.id,
            secret: self.delete_secret.clone(),
        })
    }

    /// Returns the route to follow once the post is gone.
    pub fn finish_delete(&mut self, request: DeleteRequest, result: Result<(), ApiError>) -> Option<Route> {
        self.deleting = false;

        match result {
            Ok(()) => {
                tracing::info!(post_id = %request.post_id, "Post deleted");
                self.close_delete();
                self.notice = Some(Notice::info(notice::POST_DELETED));
                Some(Route::List)
            }
            Err(ApiError::SecretMismatch) => {
                self.notice = Some(Notice::error(notice::SECRET_MISMATCH));
                None
            }
            Err(e) => {
                tracing::error!(post_id = %request.post_id, error = %e, "Failed to delete post");
                self.notice = Some(Notice::error(notice::DELETE_FAILED));
                None
            }
        }
    }

    pub async fn delete(&mut self) -> Option<Route> {
        let request = self.begin_delete()?;
        let result = self.api.delete_post(request.post_id, &request.secret).await;
        self.finish_delete(request, result)
    }

    // Comments

    pub fn set_comment_input(&mut self, text: impl Into<String>) {
        self.comment_input = text.into();
    }

    pub fn comment_input(&self) -> &str {
        &self.comment_input
    }

    /// The trimmed comment text, or `None` when there is nothing to send.
    pub fn begin_comment(&mut self) -> Option<String> {
        if self.commenting {
            return None;
        }
        let text = self.comment_input.trim();
        if text.is_empty() {
            return None;
        }

        let text = text.to_string();
        self.commenting = true;
        Some(text)
    }

    pub fn finish_comment(&mut self, result: Result<Comment, ApiError>) {
        self.commenting = false;

        match result {
            Ok(comment) => {
                self.comments.insert(0, comment);
                self.comment_input.clear();
            }
            Err(e) => {
                tracing::error!(post_id = %self.post_id, error = %e, "Failed to add comment");
                self.notice = Some(Notice::error(notice::COMMENT_FAILED));
            }
        }
    }

    pub async fn add_comment(&mut self) {
        let Some(text) = self.begin_comment() else {
            return;
        };
        let result = self.api.create_comment(self.post_id, &text).await;
        self.finish_comment(result);
    }

    // Rendering

    pub fn post_id(&self) -> Uuid {
        self.post_id
    }

    pub fn state(&self) -> &PostState {
        &self.post
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.post {
            PostState::Loaded(post) => Some(post),
            _ => None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Image URL to render, unless it is missing or failed to load.
    pub fn image(&self) -> Option<&str> {
        if self.image_failed {
            return None;
        }
        self.post()?
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// Report that the image could not be loaded.
    pub fn image_failed(&mut self) {
        self.image_failed = true;
    }

    pub fn age(&self, now: DateTime<Utc>) -> Option<String> {
        self.post().map(|post| format_relative(post.created_at, now))
    }

    pub fn upvote_label(&self) -> Option<String> {
        self.post().map(|post| match post.upvotes {
            1 => "1 upvote".to_string(),
            n => format!("{n} upvotes"),
        })
    }

    pub fn comments_heading(&self) -> String {
        format!("Comments ({})", self.comments.len())
    }

    pub fn edit_route(&self) -> Route {
        Route::Edit(self.post_id)
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

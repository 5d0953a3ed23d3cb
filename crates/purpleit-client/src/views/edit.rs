//! Secret-gated edit form.

use std::sync::Arc;

use uuid::Uuid;

use purpleit_core::domain::{Post, normalize_title};
use purpleit_core::ports::SecretService;
use purpleit_shared::dto::UpdatePostRequest;

use crate::api::BoardApi;
use crate::error::ApiError;
use crate::notice::{self, Notice};
use crate::request_seq::{RequestSeq, Ticket};
use crate::route::Route;
use crate::views::optional;

pub struct EditForm {
    api: Arc<dyn BoardApi>,
    secrets: Arc<dyn SecretService>,
    post_id: Uuid,
    post: Option<Post>,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub secret: String,
    loading: bool,
    busy: bool,
    seq: RequestSeq,
    notice: Option<Notice>,
}

impl EditForm {
    pub fn new(api: Arc<dyn BoardApi>, secrets: Arc<dyn SecretService>, post_id: Uuid) -> Self {
        Self {
            api,
            secrets,
            post_id,
            post: None,
            title: String::new(),
            content: String::new(),
            image_url: String::new(),
            secret: String::new(),
            loading: false,
            busy: false,
            seq: RequestSeq::new(),
            notice: None,
        }
    }

    /// Load the post and prefill the fields.
    pub async fn enter(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.get_post(self.post_id).await;
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.seq.next()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Option<Post>, ApiError>) {
        if !self.seq.is_current(ticket) {
            tracing::debug!(post_id = %self.post_id, "Discarding stale post");
            return;
        }
        self.loading = false;

        match result {
            Ok(Some(post)) => {
                self.title = post.title.clone();
                self.content = post.content.clone().unwrap_or_default();
                self.image_url = post.image_url.clone().unwrap_or_default();
                self.post = Some(post);
            }
            Ok(None) => {
                tracing::warn!(post_id = %self.post_id, "Post to edit does not exist");
                self.notice = Some(Notice::error(notice::LOAD_POST_FAILED));
            }
            Err(e) => {
                tracing::error!(post_id = %self.post_id, error = %e, "Failed to load post");
                self.notice = Some(Notice::error(notice::LOAD_POST_FAILED));
            }
        }
    }

    /// Check the secret locally and validate the title.
    pub fn begin_submit(&mut self) -> Option<UpdatePostRequest> {
        if self.busy {
            return None;
        }
        let post = self.post.as_ref()?;

        if !matches!(self.secrets.verify(&self.secret, &post.secret_hash), Ok(true)) {
            tracing::warn!(post_id = %post.id, "Secret key mismatch on edit");
            self.notice = Some(Notice::error(notice::SECRET_MISMATCH));
            return None;
        }
        let Some(title) = normalize_title(&self.title) else {
            self.notice = Some(Notice::error(notice::TITLE_REQUIRED));
            return None;
        };

        let req = UpdatePostRequest {
            title: title.to_string(),
            content: optional(&self.content),
            image_url: optional(&self.image_url),
            secret: self.secret.clone(),
        };
        self.busy = true;
        Some(req)
    }

    pub fn finish_submit(&mut self, result: Result<Post, ApiError>) -> Option<Route> {
        self.busy = false;

        match result {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post updated");
                self.notice = Some(Notice::info(notice::POST_UPDATED));
                let route = Route::Detail(post.id);
                self.post = Some(post);
                Some(route)
            }
            Err(ApiError::SecretMismatch) => {
                self.notice = Some(Notice::error(notice::SECRET_MISMATCH));
                None
            }
            Err(e) => {
                tracing::error!(post_id = %self.post_id, error = %e, "Failed to update post");
                self.notice = Some(Notice::error(notice::UPDATE_FAILED));
                None
            }
        }
    }

    pub async fn submit(&mut self) -> Option<Route> {
        let req = self.begin_submit()?;
        let result = self.api.update_post(self.post_id, req).await;
        self.finish_submit(result)
    }

    pub fn cancel(&self) -> Route {
        Route::Detail(self.post_id)
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, SECRET, secrets, seed_post};
    use chrono::TimeDelta;

    async fn loaded(api: &Arc<FakeApi>, post_id: Uuid) -> EditForm {
        let mut form = EditForm::new(api.clone(), secrets(), post_id);
        form.enter().await;
        form
    }

    #[tokio::test]
    async fn test_enter_prefills_fields() {
        let api = FakeApi::new();
        let post = seed_post(&api, "Original", 0, TimeDelta::hours(1)).await;

        let form = loaded(&api, post.id).await;

        assert_eq!(form.title, "Original");
        assert_eq!(form.content, "");
        assert_eq!(form.secret, "");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_submit_updates_and_marks_edited() {
        let api = FakeApi::new();
        let post = seed_post(&api, "Original", 3, TimeDelta::hours(1)).await;
        let mut form = loaded(&api, post.id).await;

        form.title = "Renamed".to_string();
        form.image_url = "https://img.example/a.png".to_string();
        form.secret = SECRET.to_string();
        let route = form.submit().await;

        assert_eq!(route, Some(Route::Detail(post.id)));
        let stored = api.stored(post.id).await.unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.image_url.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(stored.upvotes, 3);
        assert!(stored.is_edited());
        assert!(!form.is_busy());
        assert_eq!(
            form.take_notice(),
            Some(Notice::info(notice::POST_UPDATED))
        );
    }

    #[tokio::test]
    async fn test_wrong_secret_makes_no_update_call() {
        let api = FakeApi::new();
        let post = seed_post(&api, "Original", 0, TimeDelta::hours(1)).await;
        let mut form = loaded(&api, post.id).await;

        form.title = "Hijacked".to_string();
        form.secret = "guess".to_string();

        assert_eq!(form.submit().await, None);
        assert_eq!(api.calls("update_post"), 0);
        assert_eq!(api.stored(post.id).await.unwrap().title, "Original");
        assert!(!form.is_busy());
        assert_eq!(
            form.take_notice(),
            Some(Notice::error(notice::SECRET_MISMATCH))
        );
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let api = FakeApi::new();
        let post = seed_post(&api, "Original", 0, TimeDelta::hours(1)).await;
        let mut form = loaded(&api, post.id).await;

        form.title = "  ".to_string();
        form.secret = SECRET.to_string();

        assert_eq!(form.submit().await, None);
        assert_eq!(api.calls("update_post"), 0);
        assert_eq!(
            form.take_notice(),
            Some(Notice::error(notice::TITLE_REQUIRED))
        );
    }

    #[tokio::test]
    async fn test_missing_post_shows_load_error() {
        let api = FakeApi::new();
        let mut form = loaded(&api, Uuid::new_v4()).await;

        assert!(form.post().is_none());
        assert_eq!(
            form.take_notice(),
            Some(Notice::error(notice::LOAD_POST_FAILED))
        );

        form.secret = SECRET.to_string();
        assert_eq!(form.submit().await, None);
        assert_eq!(api.calls("update_post"), 0);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_fields() {
        let api = FakeApi::new();
        let post = seed_post(&api, "Original", 0, TimeDelta::hours(1)).await;
        api.fail_on("update_post");
        let mut form = loaded(&api, post.id).await;

        form.title = "Renamed".to_string();
        form.secret = SECRET.to_string();

        assert_eq!(form.submit().await, None);
        assert_eq!(form.title, "Renamed");
        assert!(!form.is_busy());
        assert_eq!(
            form.take_notice(),
            Some(Notice::error(notice::UPDATE_FAILED))
        );
    }

    #[tokio::test]
    async fn test_cancel_returns_to_detail() {
        let api = FakeApi::new();
        let id = Uuid::new_v4();
        let form = EditForm::new(api.clone(), secrets(), id);
        assert_eq!(form.cancel(), Route::Detail(id));
    }
}

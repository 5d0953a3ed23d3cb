//! New post form.

use std::sync::Arc;

use uuid::Uuid;

use purpleit_core::domain::{Post, normalize_title};
use purpleit_shared::dto::CreatePostRequest;

use crate::api::BoardApi;
use crate::error::ApiError;
use crate::notice::{self, Notice};
use crate::route::Route;
use crate::views::optional;

pub struct CreateForm {
    api: Arc<dyn BoardApi>,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub secret: String,
    busy: bool,
    notice: Option<Notice>,
}

impl CreateForm {
    pub fn new(api: Arc<dyn BoardApi>) -> Self {
        Self {
            api,
            title: String::new(),
            content: String::new(),
            image_url: String::new(),
            secret: String::new(),
            busy: false,
            notice: None,
        }
    }

    /// Validate the form and build the insert with a fresh ID.
    pub fn begin_submit(&mut self) -> Option<CreatePostRequest> {
        if self.busy {
            return None;
        }

        let Some(title) = normalize_title(&self.title) else {
            self.notice = Some(Notice::error(notice::TITLE_REQUIRED));
            return None;
        };
        if self.secret.trim().is_empty() {
            self.notice = Some(Notice::error(notice::SECRET_REQUIRED));
            return None;
        }

        let req = CreatePostRequest {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: optional(&self.content),
            image_url: optional(&self.image_url),
            secret: self.secret.clone(),
        };
        self.busy = true;
        Some(req)
    }

    /// On success, returns the new post's detail route. On failure the form
    /// keeps its fields.
    pub fn finish_submit(&mut self, result: Result<Post, ApiError>) -> Option<Route> {
        self.busy = false;

        match result {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post created");
                self.notice = Some(Notice::info(notice::POST_CREATED));
                Some(Route::Detail(post.id))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create post");
                self.notice = Some(Notice::error(notice::CREATE_FAILED));
                None
            }
        }
    }

    pub async fn submit(&mut self) -> Option<Route> {
        let req = self.begin_submit()?;
        let result = self.api.create_post(req).await;
        self.finish_submit(result)
    }

    pub fn cancel(&self) -> Route {
        Route::List
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

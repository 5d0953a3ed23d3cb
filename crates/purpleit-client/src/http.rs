//! `BoardApi` over the Purpleit HTTP API.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use purpleit_core::domain::{Comment, Post};
use purpleit_shared::ErrorResponse;
use purpleit_shared::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, DeletePostRequest, PostResponse,
    UpdatePostRequest,
};

use crate::api::BoardApi;
use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP implementation of the data access facade.
pub struct HttpBoardApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBoardApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

/// Turn non-2xx responses into `ApiError`.
async fn check(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    match status {
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        StatusCode::FORBIDDEN => Err(ApiError::SecretMismatch),
        _ => {
            let detail = res
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.detail)
                .unwrap_or_else(|| status.to_string());

            Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    Ok(check(res).await?.json::<T>().await?)
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let res = self.client.get(self.url("/posts")).send().await?;
        let posts: Vec<PostResponse> = read_json(res).await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        let res = self
            .client
            .get(self.url(&format!("/posts/{id}")))
            .send()
            .await?;

        match read_json::<PostResponse>(res).await {
            Ok(post) => Ok(Some(post.into())),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_post(&self, req: CreatePostRequest) -> Result<Post, ApiError> {
        let res = self
            .client
            .post(self.url("/posts"))
            .json(&req)
            .send()
            .await?;
        let post: PostResponse = read_json(res).await?;
        Ok(post.into())
    }

    async fn update_post(&self, id: Uuid, req: UpdatePostRequest) -> Result<Post, ApiError> {
        let res = self
            .client
            .put(self.url(&format!("/posts/{id}")))
            .json(&req)
            .send()
            .await?;
        let post: PostResponse = read_json(res).await?;
        Ok(post.into())
    }

    async fn upvote_post(&self, id: Uuid) -> Result<Post, ApiError> {
        let res = self
            .client
            .post(self.url(&format!("/posts/{id}/upvote")))
            .send()
            .await?;
        let post: PostResponse = read_json(res).await?;
        Ok(post.into())
    }

    async fn delete_post(&self, id: Uuid, secret: &str) -> Result<(), ApiError> {
        let res = self
            .client
            .delete(self.url(&format!("/posts/{id}")))
            .json(&DeletePostRequest {
                secret: secret.to_string(),
            })
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, ApiError> {
        let res = self
            .client
            .get(self.url(&format!("/posts/{post_id}/comments")))
            .send()
            .await?;
        let comments: Vec<CommentResponse> = read_json(res).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    async fn create_comment(&self, post_id: Uuid, text: &str) -> Result<Comment, ApiError> {
        let res = self
            .client
            .post(self.url(&format!("/posts/{post_id}/comments")))
            .json(&CreateCommentRequest {
                comment: text.to_string(),
            })
            .send()
            .await?;
        let comment: CommentResponse = read_json(res).await?;
        Ok(comment.into())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use actix_web::http::StatusCode as ServerStatus;
    use actix_web::{App, HttpResponse, HttpServer, web};

    use super::*;

    fn problem(body: ErrorResponse) -> HttpResponse {
        HttpResponse::build(ServerStatus::from_u16(body.status).unwrap()).json(body)
    }

    async fn delete_with_secret(body: web::Json<DeletePostRequest>) -> HttpResponse {
        if body.secret == "clé" {
            HttpResponse::NoContent().finish()
        } else {
            problem(ErrorResponse::secret_mismatch())
        }
    }

    /// Serve canned responses on an ephemeral port and point a client at it.
    fn spawn_backend() -> HttpBoardApi {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(|| {
            App::new().service(
                web::scope("/api")
                    .route(
                        "/posts",
                        web::get().to(|| async {
                            problem(
                                ErrorResponse::new(503, "Service Unavailable")
                                    .with_detail("database is down"),
                            )
                        }),
                    )
                    .route(
                        "/posts/{id}",
                        web::get().to(|| async { problem(ErrorResponse::not_found("post missing")) }),
                    )
                    .route(
                        "/posts/{id}",
                        web::put().to(|| async { problem(ErrorResponse::secret_mismatch()) }),
                    )
                    .route("/posts/{id}", web::delete().to(delete_with_secret))
                    .route(
                        "/posts/{id}/upvote",
                        web::post().to(|| async { HttpResponse::InternalServerError().body("boom") }),
                    ),
            )
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        tokio::spawn(server);

        HttpBoardApi::new(&ClientConfig {
            api_url: format!("http://127.0.0.1:{port}"),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let api = HttpBoardApi::new(&ClientConfig {
            api_url: "http://board.local:9000/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(api.url("/posts"), "http://board.local:9000/api/posts");
    }

    #[tokio::test]
    async fn test_missing_post_is_none() {
        let api = spawn_backend();

        let post = api.get_post(Uuid::new_v4()).await.unwrap();
        assert_eq!(post, None);
    }

    #[tokio::test]
    async fn test_forbidden_is_secret_mismatch() {
        let api = spawn_backend();

        let result = api
            .update_post(
                Uuid::new_v4(),
                UpdatePostRequest {
                    title: "Renamed".to_string(),
                    content: None,
                    image_url: None,
                    secret: "guess".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ApiError::SecretMismatch)));
    }

    #[tokio::test]
    async fn test_other_status_carries_problem_detail() {
        let api = spawn_backend();

        let result = api.list_posts().await;

        match result {
            Err(ApiError::Status { status, detail }) => {
                assert_eq!(status, 503);
                assert_eq!(detail, "database is down");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_without_problem_body_uses_reason() {
        let api = spawn_backend();

        let result = api.upvote_post(Uuid::new_v4()).await;

        match result {
            Err(ApiError::Status { status, detail }) => {
                assert_eq!(status, 500);
                assert_eq!(detail, "500 Internal Server Error");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_sends_non_ascii_secret_in_body() {
        let api = spawn_backend();

        api.delete_post(Uuid::new_v4(), "clé").await.unwrap();
        let wrong = api.delete_post(Uuid::new_v4(), "cle").await;

        assert!(matches!(wrong, Err(ApiError::SecretMismatch)));
    }
}

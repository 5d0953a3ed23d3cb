//! Application state - shared across all handlers.

use std::sync::Arc;

use purpleit_core::ports::{CommentRepository, PostRepository, SecretService};
use purpleit_infra::{Argon2SecretService, DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use purpleit_infra::{DatabasePool, PostgresCommentRepository, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub secrets: Arc<dyn SecretService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabasePool::init(config).await {
                Ok(pool) => Self {
                    posts: Arc::new(PostgresPostRepository::new(pool.main.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(pool.main)),
                    secrets: Arc::new(Argon2SecretService::new()),
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }

    /// State backed by in-memory repositories.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
            secrets: Arc::new(Argon2SecretService::new()),
        }
    }
}

//! # Purpleit Infrastructure
//!
//! Concrete implementations of the ports defined in `purpleit-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `secret` - Argon2 hashing of post secrets

pub mod database;
pub mod memory;

#[cfg(feature = "secret")]
pub mod secret;

// Re-exports - In-Memory
pub use database::DatabaseConfig;
pub use memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryStore};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{DatabasePool, PostgresCommentRepository, PostgresPostRepository};

#[cfg(feature = "secret")]
pub use secret::Argon2SecretService;

//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod secret;

pub use repository::{BaseRepository, CommentRepository, PostRepository};
pub use secret::{SecretError, SecretService};

//! Client-side error types.

use thiserror::Error;

/// Failure of a call through the data access facade.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend rejected the secret key")]
    SecretMismatch,

    #[error("Entity not found")]
    NotFound,

    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },
}

//! Post secret ports.
//!
//! The secret is a toy credential: whoever knows it may edit or delete the
//! post. It is never stored in plaintext.

/// Secret hashing service.
pub trait SecretService: Send + Sync {
    /// Hash a plain text secret for storage.
    fn hash(&self, secret: &str) -> Result<String, SecretError>;

    /// Verify an entered secret against a stored hash.
    fn verify(&self, secret: &str, hash: &str) -> Result<bool, SecretError>;
}

/// Secret hashing errors.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Stored secret is malformed: {0}")]
    MalformedHash(String),
}

//! Argon2 hashing of post secrets.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use purpleit_core::ports::{SecretError, SecretService};

/// Argon2-based secret service.
pub struct Argon2SecretService {
    argon2: Argon2<'static>,
}

impl Argon2SecretService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2SecretService {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretService for Argon2SecretService {
    fn hash(&self, secret: &str) -> Result<String, SecretError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| SecretError::HashingError(e.to_string()))
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, SecretError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| SecretError::MalformedHash(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

//! Argon2id hashing for account passwords and folder secrets.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::error;

use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;

/// Hashes secrets with Argon2id and checks candidates against stored
/// hashes. Plaintext never leaves this type.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a secret with a fresh random salt, returning a PHC string.
    pub fn hash(&self, secret: &str) -> AppResult<String> {
        if secret.is_empty() {
            return Err(AppError::validation("Secret must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Secret hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Checks `secret` against a stored hash. A mismatch, or a stored
    /// hash that cannot be parsed, yields `false`.
    pub fn verify(&self, secret: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(error = %e, "Stored secret hash is malformed");
                return false;
            }
        };

        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                error!(error = %e, "Secret verification failed");
                false
            }
        }
    }
}

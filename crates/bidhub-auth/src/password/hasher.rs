//! Argon2id password hashing and verification.
//!
//! Hashing is deliberately slow (tens of milliseconds). The async entry
//! points run on the tokio blocking pool so concurrent login attempts do
//! not queue behind each other on the async executor.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use bidhub_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Stateless; safe to call concurrently.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id digest.
    ///
    /// A malformed digest verifies to `Ok(false)` rather than erroring; an
    /// empty digest is a programmer error and is reported as such.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        if hash.is_empty() {
            return Err(AppError::internal("Empty password digest"));
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        let argon2 = Argon2::default();
        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Async wrapper around [`Self::hash_password`] on the blocking pool.
    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Async wrapper around [`Self::verify_password`] on the blocking pool.
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash_password("correct horse battery staple").unwrap();

        assert!(digest.starts_with("$argon2"));
        assert!(
            hasher
                .verify_password("correct horse battery staple", &digest)
                .unwrap()
        );
        assert!(!hasher.verify_password("wrong password", &digest).unwrap());
    }

    #[test]
    fn test_same_password_different_digests() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("password123").unwrap();
        let b = hasher.hash_password("password123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_digest_is_false() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("anything", "not-a-digest").unwrap());
    }

    #[test]
    fn test_empty_digest_is_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("anything", "").is_err());
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("password123".to_string()).await.unwrap();
        assert!(
            hasher
                .verify("password123".to_string(), digest)
                .await
                .unwrap()
        );
    }
}

//! JWT token creation with configurable signing and TTL.

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use bidhub_core::config::AuthConfig;
use bidhub_core::error::AppError;

use super::claims::{Claims, TokenKind};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// Secret key for signing.
    encoding_key: EncodingKey,
    /// Signing algorithm, parsed once from configuration.
    algorithm: Algorithm,
    /// Access token TTL.
    access_ttl: Duration,
    /// Refresh token TTL.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// An unrecognized algorithm name is a configuration error: issuance
    /// must not silently fall back to a different algorithm.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = Algorithm::from_str(&config.jwt_algorithm).map_err(|_| {
            AppError::configuration(format!(
                "Unknown JWT signing algorithm: '{}'",
                config.jwt_algorithm
            ))
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            algorithm,
            access_ttl: Duration::minutes(config.access_token_ttl_minutes as i64),
            refresh_ttl: Duration::minutes(config.refresh_token_ttl_minutes as i64),
        })
    }

    /// Issues an access token for the given subject.
    ///
    /// `ttl` overrides the configured default when supplied.
    pub fn issue_access(&self, subject: Uuid, ttl: Option<Duration>) -> Result<String, AppError> {
        self.issue(subject, TokenKind::Access, ttl.unwrap_or(self.access_ttl))
    }

    /// Issues a refresh token for the given subject.
    pub fn issue_refresh(&self, subject: Uuid, ttl: Option<Duration>) -> Result<String, AppError> {
        self.issue(subject, TokenKind::Refresh, ttl.unwrap_or(self.refresh_ttl))
    }

    fn issue(&self, subject: Uuid, kind: TokenKind, ttl: Duration) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject,
            exp: (Utc::now() + ttl).timestamp(),
            kind,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))
    }
}

//! JWT token verification.

use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use bidhub_core::config::AuthConfig;
use bidhub_core::error::AppError;

use super::claims::Claims;

/// Validates JWT token strings.
///
/// Verification is a pure function of the token string, the server secret,
/// and the current time; no session store is consulted.
#[derive(Clone)]
pub struct JwtDecoder {
    /// Secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = Algorithm::from_str(&config.jwt_algorithm).map_err(|_| {
            AppError::configuration(format!(
                "Unknown JWT signing algorithm: '{}'",
                config.jwt_algorithm
            ))
        })?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates a token string, checking signature and expiry.
    ///
    /// Every failure collapses to `None`: bad signature, malformed structure,
    /// and expiry are indistinguishable to callers. Leaking which check
    /// failed is a minor information-disclosure risk, so the reason is only
    /// logged at debug level.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(reason = %e, "token verification failed");
                None
            }
        }
    }
}

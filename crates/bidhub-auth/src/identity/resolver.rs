//! Resolves a raw token string into a full user identity.

use std::sync::Arc;

use tracing::warn;

use bidhub_database::UserStore;
use bidhub_entity::user::User;

use crate::error::AuthError;
use crate::jwt::{JwtDecoder, TokenKind};

/// Turns a bearer token into a verified [`User`], or a typed failure.
///
/// The check ordering is fixed: missing token, then signature/expiry, then
/// token kind, then user lookup, then account state. Transport adapters
/// collapse most of these into one generic failure signal; the ordering
/// keeps server-side logs consistent.
#[derive(Clone)]
pub struct IdentityResolver {
    /// Token verification.
    decoder: Arc<JwtDecoder>,
    /// External user-lookup collaborator.
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish()
    }
}

impl IdentityResolver {
    /// Creates a new resolver.
    pub fn new(decoder: Arc<JwtDecoder>, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Resolves `token` into a user, requiring the given token kind.
    pub async fn resolve(
        &self,
        token: Option<&str>,
        expected: TokenKind,
    ) -> Result<User, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;

        let claims = self.decoder.verify(token).ok_or(AuthError::InvalidToken)?;

        if claims.kind != expected {
            return Err(AuthError::WrongTokenKind { expected });
        }

        // A failing lookup is indistinguishable from an unknown subject to
        // the caller; the cause is only recorded server-side.
        let user = match self.users.find_by_id(claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::UnknownUser),
            Err(e) => {
                warn!(subject = %claims.sub, error = %e, "user lookup failed during resolution");
                return Err(AuthError::UnknownUser);
            }
        };

        if !user.is_active {
            return Err(AuthError::InactiveAccount);
        }

        Ok(user)
    }
}

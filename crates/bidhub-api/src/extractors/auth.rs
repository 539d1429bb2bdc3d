//! Authentication extractors — pull the JWT from the Authorization header,
//! resolve the identity, and optionally enforce a role.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use tracing::warn;

use bidhub_auth::jwt::TokenKind;
use bidhub_entity::user::{User, UserRole};

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user available in handlers.
///
/// Resolution failures short-circuit the handler with a 401 response; the
/// specific failure reason is logged here and never echoed to the client.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);

        let user = state
            .resolver
            .resolve(token.as_deref(), TokenKind::Access)
            .await
            .map_err(|e| {
                warn!(path = %parts.uri.path(), reason = %e, "authentication failed");
                ApiError::from(e)
            })?;

        Ok(AuthUser(user))
    }
}

/// Like [`AuthUser`], but additionally requires the admin role.
///
/// An authenticated non-admin is rejected with 403 (no `WWW-Authenticate`
/// header — the caller's identity is already known to be valid).
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl std::ops::Deref for RequireAdmin {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        state
            .authorizer
            .authorize(&user, UserRole::Admin)
            .map_err(|e| {
                warn!(path = %parts.uri.path(), user_id = %user.id, reason = %e, "authorization denied");
                ApiError::from(e)
            })?;

        Ok(RequireAdmin(user))
    }
}

/// Extract the bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

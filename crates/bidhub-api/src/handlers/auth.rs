//! Auth handlers — login, register, refresh, me.

use axum::Json;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use tracing::warn;
use validator::Validate;

use bidhub_auth::jwt::TokenKind;
use bidhub_core::error::AppError;

use crate::dto::request::{LoginForm, RefreshRequest, RegisterRequest};
use crate::dto::response::{TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/auth/login
///
/// OAuth2-compatible form login. Returns an access + refresh token pair.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await?;

    let access_token = state.jwt_encoder.issue_access(user.id, None)?;
    let refresh_token = state.jwt_encoder.issue_refresh(user.id, None)?;

    Ok(Json(TokenResponse::bearer(access_token, refresh_token)))
}

/// POST /api/v1/auth/register
///
/// Registers a new standard-role user. 409 if the email is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .register(&req.email, &req.password, req.full_name)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a brand-new token pair. The superseded
/// refresh token is not invalidated; it simply ages out at its expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .resolver
        .resolve(Some(&req.refresh_token), TokenKind::Refresh)
        .await
        .map_err(|e| {
            warn!(reason = %e, "token refresh rejected");
            ApiError::from(e)
        })?;

    let access_token = state.jwt_encoder.issue_access(user.id, None)?;
    let refresh_token = state.jwt_encoder.issue_refresh(user.id, None)?;

    Ok(Json(TokenResponse::bearer(access_token, refresh_token)))
}

/// GET /api/v1/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

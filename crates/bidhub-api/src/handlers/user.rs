//! User management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use bidhub_core::error::AppError;
use bidhub_service::user::ProfileUpdate;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, RequireAdmin};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 100;

/// GET /api/v1/users/me
pub async fn get_profile(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

/// PATCH /api/v1/users/me
///
/// Self-service profile update. Role changes require admin privileges and
/// are silently dropped otherwise.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(mut req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if !user.is_admin() {
        req.role = None;
    }

    let updated = state
        .user_service
        .update(
            user.id,
            ProfileUpdate {
                email: req.email,
                password: req.password,
                full_name: req.full_name,
                is_active: req.is_active,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// GET /api/v1/users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list(DEFAULT_LIST_LIMIT, 0).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{user_id} (admin only)
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_by_id(user_id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/{user_id} (admin only)
///
/// Admins can update any user, including role and active flag.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let updated = state
        .user_service
        .update(
            user_id,
            ProfileUpdate {
                email: req.email,
                password: req.password,
                full_name: req.full_name,
                is_active: req.is_active,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/v1/users/{user_id} (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

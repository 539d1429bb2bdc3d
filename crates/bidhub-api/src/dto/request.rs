//! Request DTOs.

use serde::Deserialize;
use validator::Validate;

use bidhub_entity::user::UserRole;

/// OAuth2-style form body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login email (OAuth2 password flow calls the field `username`).
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// JSON body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
}

/// JSON body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token obtained at login or from a previous refresh.
    pub refresh_token: String,
}

/// JSON body for the `PATCH /users/...` routes. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New login email.
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    /// New plaintext password.
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    /// New display name.
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New role. Ignored on self-update unless the caller is an admin.
    pub role: Option<UserRole>,
}

//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login email.
    pub email: String,
    /// Argon2 password digest. Absent for accounts provisioned externally.
    #[serde(skip_serializing)]
    pub hashed_password: Option<String>,
    /// Human-readable display name.
    pub full_name: Option<String>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// User role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the user satisfies the required role.
    ///
    /// Admin satisfies every requirement; otherwise roles must match.
    pub fn has_role(&self, required: UserRole) -> bool {
        self.role.has_at_least(&required)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub hashed_password: String,
    /// Display name (optional).
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}

/// Partial update of an existing user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    /// New email address.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub hashed_password: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New role.
    pub role: Option<UserRole>,
}

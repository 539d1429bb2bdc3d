//! Role authorization — checks a resolved identity against a required role.

use bidhub_entity::user::{User, UserRole};

use crate::error::AuthError;

/// Enforces the two-tier role hierarchy.
///
/// Admin passes every requirement; otherwise the identity's role must equal
/// the required role. Stateless and pure: the decision depends only on the
/// two roles.
#[derive(Debug, Clone, Default)]
pub struct RoleAuthorizer;

impl RoleAuthorizer {
    /// Creates a new authorizer.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the identity satisfies the required role.
    ///
    /// Returns `Ok(())` if allowed, or `Err(AuthError::InsufficientRole)` if
    /// denied. Only called with an already-resolved identity, so a denial is
    /// an authorization failure, never an authentication one.
    pub fn authorize(&self, user: &User, required: UserRole) -> Result<(), AuthError> {
        if user.role.has_at_least(&required) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole { required })
        }
    }
}

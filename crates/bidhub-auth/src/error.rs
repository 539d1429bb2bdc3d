//! Typed authentication and authorization failures.

use thiserror::Error;

use bidhub_core::error::AppError;
use bidhub_entity::user::UserRole;

/// The reasons a request-scoped authorization decision can fail.
///
/// The variants are distinguished internally (and in server-side logs); at
/// the transport boundary everything except `InsufficientRole` collapses to a
/// generic authentication failure so the client cannot probe which check
/// rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token was supplied with the request.
    #[error("missing authentication token")]
    MissingToken,
    /// The token failed signature, structure, or expiry checks.
    #[error("invalid or expired token")]
    InvalidToken,
    /// The token is valid but of the wrong kind for this operation.
    #[error("wrong token kind: expected {expected}")]
    WrongTokenKind {
        /// The kind the operation requires.
        expected: crate::jwt::TokenKind,
    },
    /// The token subject does not resolve to a known user.
    #[error("unknown user")]
    UnknownUser,
    /// The user exists but the account is disabled.
    #[error("user account is disabled")]
    InactiveAccount,
    /// The resolved identity does not satisfy the required role.
    #[error("role '{required}' required for this action")]
    InsufficientRole {
        /// The role the route requires.
        required: UserRole,
    },
}

impl AuthError {
    /// Whether this is an authentication failure (401) as opposed to an
    /// authorization failure (403).
    pub fn is_authentication(&self) -> bool {
        !matches!(self, Self::InsufficientRole { .. })
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientRole { required } => {
                AppError::authorization(format!("Role '{required}' required for this action"))
            }
            // Collapse: the specific reason is logged where the failure is
            // observed, never echoed to the client.
            _ => AppError::authentication("Authentication failed"),
        }
    }
}

//! # bidhub-auth
//!
//! Authentication and authorization core for Bidhub.
//!
//! ## Modules
//!
//! - `password` — Argon2id credential hashing and verification
//! - `jwt` — signed, expiring access/refresh token encoding and decoding
//! - `identity` — request-scoped identity resolution against the user store
//! - `rbac` — two-tier role authorization
//! - `error` — the typed failure taxonomy shared by all of the above

pub mod error;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use error::AuthError;
pub use identity::IdentityResolver;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenKind};
pub use password::PasswordHasher;
pub use rbac::RoleAuthorizer;

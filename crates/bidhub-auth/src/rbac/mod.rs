//! Role-based access control.

pub mod authorizer;

pub use authorizer::RoleAuthorizer;

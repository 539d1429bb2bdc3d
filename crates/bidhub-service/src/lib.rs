//! # bidhub-service
//!
//! Business logic sitting between the HTTP layer and the repositories.

pub mod user;

pub use user::UserService;

//! # bidhub-database
//!
//! PostgreSQL connection management and repository implementations.
//!
//! The [`repositories::UserStore`] trait is the user-lookup contract consumed
//! by the auth and service crates; [`repositories::UserRepository`] is its
//! sqlx-backed implementation.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{UserRepository, UserStore};

//! # bidhub-entity
//!
//! Domain entity models for Bidhub. Entities are plain data carriers; all
//! business rules live in `bidhub-auth` and `bidhub-service`.

pub mod user;

pub use user::{User, UserRole};

//! Repository contracts and implementations.

pub mod user;

pub use user::{UserRepository, UserStore};

//! # bidhub-api
//!
//! HTTP API layer for Bidhub built on Axum.
//!
//! Provides the auth and user endpoints, the WebSocket upgrade, the
//! authentication extractors, request logging, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

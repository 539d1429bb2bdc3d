//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bidhub_auth::identity::IdentityResolver;
use bidhub_auth::jwt::{JwtDecoder, JwtEncoder};
use bidhub_auth::password::PasswordHasher;
use bidhub_auth::rbac::RoleAuthorizer;
use bidhub_core::config::AppConfig;
use bidhub_core::result::AppResult;
use bidhub_database::UserStore;
use bidhub_service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; everything is read-only
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// JWT token issuer.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Token-to-identity resolution.
    pub resolver: Arc<IdentityResolver>,
    /// Role-based access control.
    pub authorizer: Arc<RoleAuthorizer>,
    /// User business logic.
    pub user_service: Arc<UserService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}

impl AppState {
    /// Wire up the full state from configuration and a user store.
    ///
    /// Fails if the configured signing algorithm is unknown.
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>) -> AppResult<Self> {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth)?);
        let resolver = Arc::new(IdentityResolver::new(jwt_decoder, Arc::clone(&users)));
        let user_service = Arc::new(UserService::new(users, PasswordHasher::new()));

        Ok(Self {
            config: Arc::new(config),
            jwt_encoder,
            resolver,
            authorizer: Arc::new(RoleAuthorizer::new()),
            user_service,
        })
    }
}

//! User service — registration, credential checks, profile management.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use bidhub_auth::password::PasswordHasher;
use bidhub_core::error::AppError;
use bidhub_core::result::AppResult;
use bidhub_database::UserStore;
use bidhub_entity::user::{NewUser, User, UserChanges, UserRole};

/// Requested changes to a user profile, before password hashing.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New email address.
    pub email: Option<String>,
    /// New plaintext password (hashed here).
    pub password: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New role.
    pub role: Option<UserRole>,
}

/// Service for user-related business logic.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Get a user by ID, failing with not-found if absent.
    pub async fn get_by_id(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Register a new user with the standard role.
    ///
    /// Fails with a conflict if the email is already registered. The
    /// conflict message names the field but never echoes the value.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> AppResult<User> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let hashed_password = self.hasher.hash(password.to_string()).await?;

        let user = self
            .users
            .create(&NewUser {
                email: email.to_string(),
                hashed_password,
                full_name,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Authenticate by email and password.
    ///
    /// The same generic message covers unknown email, missing digest, and
    /// wrong password, so login responses do not reveal which failed. The
    /// active-state check runs only after the credentials pass.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let invalid = || AppError::authentication("Invalid email or password");

        let user = self.users.find_by_email(email).await?.ok_or_else(invalid)?;

        let digest = user.hashed_password.clone().ok_or_else(invalid)?;
        if !self.hasher.verify(password.to_string(), digest).await? {
            warn!(user_id = %user.id, "login failed: bad credentials");
            return Err(invalid());
        }

        if !user.is_active {
            warn!(user_id = %user.id, "login rejected: account disabled");
            return Err(AppError::authentication("User account is disabled"));
        }

        Ok(user)
    }

    /// Apply a profile update, hashing the password if one is supplied.
    pub async fn update(&self, user_id: Uuid, update: ProfileUpdate) -> AppResult<User> {
        let hashed_password = match update.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        self.users
            .update(
                user_id,
                &UserChanges {
                    email: update.email,
                    hashed_password,
                    full_name: update.full_name,
                    is_active: update.is_active,
                    role: update.role,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// List users, newest first.
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
        self.users.list(limit, offset).await
    }

    /// Delete a user by ID.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use bidhub_core::error::ErrorKind;

    use super::*;

    #[derive(Default)]
    struct MemStore {
        users: Mutex<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl UserStore for MemStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn create(&self, data: &NewUser) -> AppResult<User> {
            let user = User {
                id: Uuid::new_v4(),
                email: data.email.clone(),
                hashed_password: Some(data.hashed_password.clone()),
                full_name: data.full_name.clone(),
                is_active: true,
                role: data.role,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, id: Uuid, changes: &UserChanges) -> AppResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(email) = &changes.email {
                user.email = email.clone();
            }
            if let Some(digest) = &changes.hashed_password {
                user.hashed_password = Some(digest.clone());
            }
            if let Some(full_name) = &changes.full_name {
                user.full_name = Some(full_name.clone());
            }
            if let Some(is_active) = changes.is_active {
                user.is_active = is_active;
            }
            if let Some(role) = changes.role {
                user.role = role;
            }
            user.updated_at = Utc::now();
            Ok(Some(user.clone()))
        }

        async fn delete(&self, id: Uuid) -> AppResult<bool> {
            Ok(self.users.lock().unwrap().remove(&id).is_some())
        }

        async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
            let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(users
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(MemStore::default()), PasswordHasher::new())
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let service = service();
        let user = service
            .register("alice@example.com", "password123", Some("Alice".into()))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::User);

        let authed = service
            .authenticate("alice@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = service();
        service
            .register("alice@example.com", "password123", None)
            .await
            .unwrap();

        let err = service
            .register("alice@example.com", "otherpassword", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service();
        service
            .register("alice@example.com", "password123", None)
            .await
            .unwrap();

        let err = service
            .authenticate("alice@example.com", "wrongpassword")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = service();
        let err = service
            .authenticate("nobody@example.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_authenticate_inactive_account() {
        let service = service();
        let user = service
            .register("alice@example.com", "password123", None)
            .await
            .unwrap();
        service
            .update(
                user.id,
                ProfileUpdate {
                    is_active: Some(false),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        let err = service
            .authenticate("alice@example.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_update_password_changes_login() {
        let service = service();
        let user = service
            .register("alice@example.com", "password123", None)
            .await
            .unwrap();

        service
            .update(
                user.id,
                ProfileUpdate {
                    password: Some("newpassword".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert!(
            service
                .authenticate("alice@example.com", "password123")
                .await
                .is_err()
        );
        assert!(
            service
                .authenticate("alice@example.com", "newpassword")
                .await
                .is_ok()
        );
    }
}

//! Integration tests for the authentication flow: login, register, refresh, me.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use bidhub_entity::user::UserRole;
use helpers::{TestApp, str_field};

#[tokio::test]
async fn test_login_success_returns_bearer_pair() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);

    let response = app
        .request_form(
            "/api/v1/auth/login",
            &[("username", "alice@example.com"), ("password", "password123")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!str_field(&response.body, "access_token").is_empty());
    assert!(!str_field(&response.body, "refresh_token").is_empty());
    assert_eq!(str_field(&response.body, "token_type"), "bearer");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);

    let response = app
        .request_form(
            "/api/v1/auth/login",
            &[("username", "alice@example.com"), ("password", "wrong")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.www_authenticate(), Some("Bearer"));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request_form(
            "/api/v1/auth/login",
            &[("username", "nobody@example.com"), ("password", "password123")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_inactive_user() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", "password123", UserRole::User);
    app.store.set_active(user.id, false);

    let response = app
        .request_form(
            "/api/v1/auth/login",
            &[("username", "alice@example.com"), ("password", "password123")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": "new@example.com",
                "password": "password123",
                "full_name": "New User",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(str_field(&response.body, "email"), "new@example.com");
    assert_eq!(str_field(&response.body, "role"), "user");

    // The new account can log in right away.
    app.login("new@example.com", "password123").await;
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_user("taken@example.com", "password123", UserRole::User);

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({"email": "taken@example.com", "password": "password123"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(str_field(&response.body, "error"), "CONFLICT");
    // The conflicting field is named, the submitted value is not echoed.
    assert!(str_field(&response.body, "message").contains("Email"));
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({"email": "new@example.com", "password": "short"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_me_with_access_token() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "GET",
            "/api/v1/auth/me",
            None,
            Some(str_field(&tokens, "access_token")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(str_field(&response.body, "email"), "alice@example.com");
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/v1/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.www_authenticate(), Some("Bearer"));
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/v1/auth/me", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_refresh_token() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "GET",
            "/api/v1/auth/me",
            None,
            Some(str_field(&tokens, "refresh_token")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_token_pair() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({"refresh_token": str_field(&tokens, "refresh_token")})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(str_field(&response.body, "token_type"), "bearer");

    // The freshly issued access token is usable.
    let me = app
        .request(
            "GET",
            "/api/v1/auth/me",
            None,
            Some(str_field(&response.body, "access_token")),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({"refresh_token": str_field(&tokens, "access_token")})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_inactive_account() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;

    app.store.set_active(user.id, false);

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({"refresh_token": str_field(&tokens, "refresh_token")})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({"refresh_token": "garbage"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

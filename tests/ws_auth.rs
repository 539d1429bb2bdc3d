//! Integration tests for WebSocket authentication.

mod helpers;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;

use bidhub_entity::user::UserRole;
use helpers::{TestApp, str_field};

/// Connect and assert that the server closes with the given code before any
/// message exchange.
async fn assert_closed_with_4001(url: &str) {
    let (mut ws, _) = connect_async(url).await.expect("handshake failed");

    match ws.next().await {
        Some(Ok(Message::Close(Some(frame)))) => {
            assert_eq!(u16::from(frame.code), 4001);
            assert!(!frame.reason.is_empty());
        }
        other => panic!("expected close frame, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ws_without_token_closes_4001() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    assert_closed_with_4001(&format!("ws://{addr}/ws")).await;
}

#[tokio::test]
async fn test_ws_with_invalid_token_closes_4001() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    assert_closed_with_4001(&format!("ws://{addr}/ws?token=not.a.token")).await;
}

#[tokio::test]
async fn test_ws_with_inactive_account_closes_4001() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;
    app.store.set_active(user.id, false);
    let addr = app.spawn_server().await;

    assert_closed_with_4001(&format!(
        "ws://{addr}/ws?token={}",
        str_field(&tokens, "access_token")
    ))
    .await;
}

#[tokio::test]
async fn test_ws_query_token_connects_and_echoes() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;
    let addr = app.spawn_server().await;

    let url = format!("ws://{addr}/ws?token={}", str_field(&tokens, "access_token"));
    let (mut ws, _) = connect_async(url.as_str()).await.expect("handshake failed");

    let hello: Value = match ws.next().await {
        Some(Ok(Message::Text(text))) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected connected envelope, got {other:?}"),
    };
    assert_eq!(str_field(&hello, "type"), "connected");
    assert_eq!(str_field(&hello, "user_id"), user.id.to_string());

    ws.send(Message::Text("ping".into())).await.unwrap();
    let echo: Value = match ws.next().await {
        Some(Ok(Message::Text(text))) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected echo, got {other:?}"),
    };
    assert_eq!(str_field(&echo, "type"), "echo");
    assert_eq!(str_field(&echo, "message"), "ping");
}

#[tokio::test]
async fn test_ws_cookie_token_fallback() {
    let app = TestApp::new();
    app.create_user("alice@example.com", "password123", UserRole::User);
    let tokens = app.login("alice@example.com", "password123").await;
    let addr = app.spawn_server().await;

    let mut request = format!("ws://{addr}/ws")
        .into_client_request()
        .expect("bad request");
    request.headers_mut().insert(
        "Cookie",
        HeaderValue::from_str(&format!(
            "access_token={}",
            str_field(&tokens, "access_token")
        ))
        .unwrap(),
    );

    let (mut ws, _) = connect_async(request).await.expect("handshake failed");

    match ws.next().await {
        Some(Ok(Message::Text(text))) => {
            let hello: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(str_field(&hello, "type"), "connected");
        }
        other => panic!("expected connected envelope, got {other:?}"),
    }
}

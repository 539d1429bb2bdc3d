//! WebSocket upgrade handler.
//!
//! The token arrives as a `?token=` query parameter, with the `access_token`
//! cookie as a fallback. Authentication happens before any message exchange;
//! a failed resolution closes the socket with application close code 4001
//! and the failure is still recorded server-side.

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, info, warn};

use bidhub_auth::error::AuthError;
use bidhub_auth::jwt::TokenKind;
use bidhub_entity::user::User;

use crate::state::AppState;

/// Application-specific close code for authentication failures.
const AUTH_FAILURE_CLOSE_CODE: u16 = 4001;

/// Cookie set by the HTTP login flow.
const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Query parameters for WebSocket authentication.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: Option<String>,
}

/// GET /ws — WebSocket upgrade.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    jar: CookieJar,
) -> Response {
    // Query parameter first, cookie as fallback.
    let token = query
        .token
        .or_else(|| jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()));

    match state
        .resolver
        .resolve(token.as_deref(), TokenKind::Access)
        .await
    {
        Ok(user) => ws.on_upgrade(move |socket| handle_socket(socket, user)),
        Err(e) => {
            warn!(reason = %e, "websocket authentication failed");
            let reason = close_reason(&e);
            ws.on_upgrade(move |socket| reject_socket(socket, reason))
        }
    }
}

/// Close an unauthenticated socket before any message exchange.
async fn reject_socket(mut socket: WebSocket, reason: &'static str) {
    let frame = CloseFrame {
        code: AUTH_FAILURE_CLOSE_CODE,
        reason: reason.into(),
    };
    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        debug!(error = %e, "failed to send close frame");
    }
}

/// Human-readable close reason for the client.
fn close_reason(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid or expired token",
        AuthError::WrongTokenKind { .. } => "Invalid token type",
        AuthError::UnknownUser => "Unknown user",
        AuthError::InactiveAccount => "User account is disabled",
        AuthError::InsufficientRole { .. } => "Insufficient role",
    }
}

/// Handles an established, authenticated WebSocket connection.
///
/// Sends a connected envelope, then echoes text frames back to the client.
async fn handle_socket(mut socket: WebSocket, user: User) {
    info!(user_id = %user.id, "websocket connection established");

    let hello = serde_json::json!({
        "type": "connected",
        "user_id": user.id,
        "email": user.email,
    });
    if socket.send(Message::Text(hello.to_string().into())).await.is_err() {
        return;
    }

    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => {
                let reply = serde_json::json!({
                    "type": "echo",
                    "message": text.as_str(),
                });
                if socket
                    .send(Message::Text(reply.to_string().into()))
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "websocket error");
                break;
            }
        }
    }

    info!(user_id = %user.id, "websocket connection closed");
}

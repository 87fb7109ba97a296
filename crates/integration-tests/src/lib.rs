//! In-process integration harness for Palisade.
//!
//! Builds the production router over in-memory stores and drives it one
//! request at a time, so tests cover the whole pipeline (token
//! verification, identity extraction, authorization, stores) without a
//! database or a listening socket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p palisade-integration-tests
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use palisade_core::types::{Role, UserId};
use palisade_server::{app, test_support};

pub use palisade_server::test_support::{
    bearer_token, bearer_token_without_subject, bearer_token_wrong_issuer,
};

/// Build the production router over fresh in-memory stores.
#[must_use]
pub fn test_app() -> Router {
    app::build(test_support::memory_state())
}

/// Send one request through the router and decode the JSON body.
///
/// Empty bodies decode to `Value::Null`; plain-text bodies (the health
/// endpoint, default error responses) come back as a JSON string.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request is well-formed");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// A registration payload with the given username and sensible defaults.
#[must_use]
pub fn user_payload(username: &str) -> Value {
    json!({
        "first_name": "Phil",
        "last_name": "Ingwell",
        "username": username,
        "password": "hunter2",
    })
}

/// Register an account and return its id with a matching bearer token.
///
/// # Panics
///
/// Panics if registration does not return 201 with a UUID id.
pub async fn register(app: &Router, username: &str) -> (UserId, String) {
    let (status, body) = send(app, "POST", "/users", None, Some(&user_payload(username))).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    let id = body["id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .map(UserId::new)
        .expect("response carries a UUID id");
    let token = bearer_token(id, username, &[Role::User]);
    (id, token)
}

/// Mint an admin token for an actor that need not exist as a row.
///
/// Authorization is decided from token scopes, not from stored roles.
#[must_use]
pub fn admin_token() -> String {
    bearer_token(UserId::random(), "root", &[Role::User, Role::Admin])
}

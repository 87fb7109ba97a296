//! Helpers for exercising the service in-process.
//!
//! Only compiled with the `test-support` feature: an [`AppState`] over
//! in-memory stores plus a token mint sharing the test secret, so tests
//! drive the real router end to end without a database or an external
//! issuer.

use std::net::IpAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use secrecy::{ExposeSecret, SecretString};

use palisade_core::types::{Role, UserId};

use crate::config::ServerConfig;
use crate::db::memory::memory_stores;
use crate::middleware::token::Claims;
use crate::state::AppState;

const TEST_TOKEN_SECRET: &str = "dGVzdC1vbmx5LXNpZ25pbmcta2V5LTAxMjM0NTY3ODk";

/// A configuration for in-process tests. No live endpoints.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("postgres://unused"),
        token_secret: SecretString::from(TEST_TOKEN_SECRET),
        token_issuer: "palisade".to_owned(),
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Application state over fresh in-memory stores.
#[must_use]
pub fn memory_state() -> AppState {
    AppState::new(test_config(), memory_stores())
}

/// Mint a bearer token for `user_id` with the given roles.
///
/// Signed with the same secret [`test_config`] installs, so the router's
/// verification middleware accepts it.
///
/// # Panics
///
/// Panics if token encoding fails; that only happens on a malformed key.
#[must_use]
pub fn bearer_token(user_id: UserId, username: &str, roles: &[Role]) -> String {
    mint_token(Some(user_id), username, roles, "palisade")
}

/// Mint a token missing the user-id claim; verification accepts it but
/// identity derivation must not.
#[must_use]
pub fn bearer_token_without_subject(username: &str) -> String {
    mint_token(None, username, &[Role::User], "palisade")
}

/// Mint a token from a different issuer; verification must reject it.
#[must_use]
pub fn bearer_token_wrong_issuer(user_id: UserId, username: &str) -> String {
    mint_token(Some(user_id), username, &[Role::User], "somewhere-else")
}

fn mint_token(user_id: Option<UserId>, username: &str, roles: &[Role], issuer: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs();
    let claims = Claims {
        sub: username.to_owned(),
        user_id: user_id.map(|id| id.to_string()),
        scp: roles.iter().map(|role| role.as_str().to_owned()).collect(),
        iss: issuer.to_owned(),
        iat: now,
        exp: now + 3600,
    };
    let key =
        jsonwebtoken::EncodingKey::from_secret(test_config().token_secret.expose_secret().as_bytes());
    jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &key)
        .expect("token encoding with an HS256 secret cannot fail")
}

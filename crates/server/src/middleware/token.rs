//! Bearer-token verification.
//!
//! This is the token-verification collaborator the core trusts: it
//! checks the HS256 signature, expiry, and issuer, then attaches a
//! [`VerifiedClaims`] extension for the [`super::auth::RequireIdentity`]
//! extractor. Everything behind this layer works with claims, never with
//! raw tokens.
//!
//! Requests without an `Authorization` header pass through
//! unauthenticated - user creation is an open endpoint - and any handler
//! that requires an identity rejects them at extraction time. A header
//! that is present but fails verification is rejected here with 401.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use palisade_core::{UserId, VerifiedClaims};

use crate::state::AppState;

/// Wire shape of the token claims, as produced by the issuer.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    /// Username the token was issued for.
    pub sub: String,
    /// The subject user's id.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Granted scope names.
    #[serde(default)]
    pub scp: Vec<String>,
    /// Issuer.
    pub iss: String,
    /// Issued-at (seconds since epoch).
    pub iat: u64,
    /// Expiry (seconds since epoch).
    pub exp: u64,
}

/// Verify a bearer token, if one is present, and attach the claims.
pub async fn verify(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let Some(header_value) = request.headers().get(header::AUTHORIZATION) else {
        return next.run(request).await;
    };

    let token = match header_value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        Some(token) => token,
        None => return StatusCode::UNAUTHORIZED.into_response(),
    };

    let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.set_issuer(&[&state.config().token_issuer]);

    let key = jsonwebtoken::DecodingKey::from_secret(
        state.config().token_secret.expose_secret().as_bytes(),
    );

    let claims = match jsonwebtoken::decode::<Claims>(token, &key, &validation) {
        Ok(data) => data.claims,
        Err(error) => {
            tracing::debug!(%error, "Bearer token rejected");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    request.extensions_mut().insert(to_verified(claims));
    next.run(request).await
}

/// Convert wire claims into the core's verified-claims value.
///
/// A missing or non-UUID `userId` claim yields no subject; the identity
/// extractor then treats the caller as unauthenticated.
fn to_verified(claims: Claims) -> VerifiedClaims {
    let subject = claims
        .user_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .map(UserId::new);
    VerifiedClaims {
        subject,
        scopes: claims.scp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(user_id: Option<&str>) -> Claims {
        Claims {
            sub: "phil".to_owned(),
            user_id: user_id.map(str::to_owned),
            scp: vec!["USER".to_owned()],
            iss: "palisade".to_owned(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn well_formed_user_id_becomes_subject() {
        let id = Uuid::new_v4();
        let verified = to_verified(claims(Some(&id.to_string())));
        assert_eq!(verified.subject, Some(UserId::new(id)));
        assert_eq!(verified.scopes, vec!["USER".to_owned()]);
    }

    #[test]
    fn missing_or_garbled_user_id_yields_no_subject() {
        assert!(to_verified(claims(None)).subject.is_none());
        assert!(to_verified(claims(Some("not-a-uuid"))).subject.is_none());
    }
}

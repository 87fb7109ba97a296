//! Identity extractor for route handlers.
//!
//! Turns the `VerifiedClaims` extension attached by [`super::token`] into
//! an [`IdentityContext`]. Handlers take the extractor as their first
//! argument; authenticated-only routes need nothing else.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     RequireIdentity(actor): RequireIdentity,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", actor.subject())
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use palisade_core::{IdentityContext, VerifiedClaims};

/// Extractor that requires an authenticated actor.
///
/// Rejects with 401 when the request carries no verified claims, or when
/// the claims lack a usable subject (malformed identity is treated as
/// unauthenticated, never as an anonymous actor).
pub struct RequireIdentity(pub IdentityContext);

/// Rejection for [`RequireIdentity`].
#[derive(Debug)]
pub struct Unauthenticated;

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

impl<S> FromRequestParts<S> for RequireIdentity
where
    S: Send + Sync,
{
    type Rejection = Unauthenticated;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<VerifiedClaims>()
            .ok_or(Unauthenticated)?;

        let actor = IdentityContext::derive(claims).map_err(|error| {
            tracing::debug!(%error, "Rejecting malformed identity");
            Unauthenticated
        })?;

        Ok(Self(actor))
    }
}

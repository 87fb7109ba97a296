//! HTTP middleware and extractors.
//!
//! # Order (bottom to top in the router)
//!
//! 1. Sentry layers (outermost, binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Token verification ([`token`]) - attaches `VerifiedClaims`
//! 4. Handlers, which extract [`auth::RequireIdentity`]

pub mod auth;
pub mod token;

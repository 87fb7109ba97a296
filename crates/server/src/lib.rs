//! Palisade server library.
//!
//! This crate provides the service as a library, allowing the router to
//! be assembled in-process for tests and reused by the binary.
//!
//! # Request pipeline
//!
//! 1. `TraceLayer` - request span with status and latency
//! 2. Token verification - a verified bearer token becomes a
//!    [`palisade_core::VerifiedClaims`] request extension; requests
//!    without a token pass through unauthenticated
//! 3. Handlers - the [`middleware::auth::RequireIdentity`] extractor
//!    derives the actor identity, then the handler checks the relevant
//!    [`palisade_core::policy`] predicate before touching any store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(feature = "test-support")]
pub mod test_support;

//! Palisade Core - Domain library for the user-account service.
//!
//! This crate holds everything that carries a real invariant:
//!
//! - [`identity`] - Per-request identity derived from a verified token
//! - [`policy`] - Ownership- and role-based authorization predicates
//! - [`upsert`] - Create-or-merge semantics for one-per-owner resources
//! - [`model`] - User, address, and profile entities plus the public
//!   profile projection
//! - [`validate`] - Field-level validation rules
//! - [`store`] - Persistence collaborator contracts
//!
//! # Architecture
//!
//! The core crate contains only types, traits, and pure logic - no I/O,
//! no database access, no HTTP. The `server` crate supplies the HTTP
//! boundary and the store implementations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod identity;
pub mod model;
pub mod policy;
pub mod store;
pub mod types;
pub mod upsert;
pub mod validate;

pub use identity::{IdentityContext, IdentityError, VerifiedClaims};
pub use model::{Address, Profile, PublicProfile, User};
pub use store::{OwnedStore, ProfileStore, StoreError, UserStore};
pub use types::{AddressId, ProfileId, Role, UserId};
pub use upsert::{Owned, upsert_owned};
pub use validate::FieldErrors;

//! Core types for Palisade.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod role;

pub use id::{AddressId, ProfileId, UserId};
pub use role::Role;

//! Route handlers for the account API.
//!
//! Every handler follows the same order: derive the actor, check the
//! authorization predicate, and only then touch a store. Denied actors
//! learn nothing about whether the target exists.

pub mod addresses;
pub mod profiles;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the combined API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(addresses::router())
        .merge(profiles::router())
}

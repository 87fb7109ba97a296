//! `PostgreSQL` store implementations.
//!
//! # Tables
//!
//! - `users` - accounts with roles stored as a text array
//! - `address` - at most one row per user (unique owner constraint)
//! - `profile` - at most one row per user (unique owner constraint)
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are applied
//! explicitly (`sqlx migrate run`), never on startup.
//!
//! Queries use the runtime sqlx API with private row types and explicit
//! row-to-domain conversion; the workspace builds without a database.

pub mod addresses;
pub mod profiles;
pub mod users;

#[cfg(feature = "test-support")]
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use palisade_core::store::StoreError;

use crate::state::Stores;

pub use addresses::PgAddressStore;
pub use profiles::PgProfileStore;
pub use users::PgUserStore;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Assemble the full store set over one shared pool.
#[must_use]
pub fn postgres_stores(pool: &PgPool) -> Stores {
    Stores {
        users: Arc::new(PgUserStore::new(pool.clone())),
        addresses: Arc::new(PgAddressStore::new(pool.clone())),
        profiles: Arc::new(PgProfileStore::new(pool.clone())),
    }
}

/// Wrap a driver error for the store taxonomy.
pub(crate) fn database(error: sqlx::Error) -> StoreError {
    StoreError::Database(Box::new(error))
}

/// Map unique-constraint violations to [`StoreError::Conflict`], leaving
/// everything else as a database error.
pub(crate) fn conflict_on_unique(error: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = error
        && db_err.is_unique_violation()
    {
        return StoreError::Conflict(message.to_owned());
    }
    database(error)
}

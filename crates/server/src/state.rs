//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use palisade_core::model::Address;
use palisade_core::store::{OwnedStore, ProfileStore, UserStore};

use crate::config::ServerConfig;

/// The persistence collaborators behind the handlers.
///
/// Stores are trait objects so the same router runs against `PostgreSQL`
/// in production and in-memory stores in tests.
#[derive(Clone)]
pub struct Stores {
    /// User account store.
    pub users: Arc<dyn UserStore>,
    /// Address store (one per owner).
    pub addresses: Arc<dyn OwnedStore<Address>>,
    /// Profile store (one per owner, plus full listing).
    pub profiles: Arc<dyn ProfileStore>,
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    stores: Stores,
    pool: Option<PgPool>,
}

impl AppState {
    /// Build state backed by arbitrary stores (no database pool).
    #[must_use]
    pub fn new(config: ServerConfig, stores: Stores) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                stores,
                pool: None,
            }),
        }
    }

    /// Build state backed by `PostgreSQL` stores sharing `pool`.
    #[must_use]
    pub fn with_postgres(config: ServerConfig, pool: PgPool) -> Self {
        let stores = crate::db::postgres_stores(&pool);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                stores,
                pool: Some(pool),
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// The user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.stores.users.as_ref()
    }

    /// The address store.
    #[must_use]
    pub fn addresses(&self) -> &dyn OwnedStore<Address> {
        self.inner.stores.addresses.as_ref()
    }

    /// The profile store.
    #[must_use]
    pub fn profiles(&self) -> &dyn ProfileStore {
        self.inner.stores.profiles.as_ref()
    }

    /// The database pool, when running against `PostgreSQL`.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}

//! Persistence collaborator contracts.
//!
//! The core never talks to a database; it talks to these traits. The
//! server crate provides the `PostgreSQL` implementations, and an
//! in-memory implementation backs the test suites.

use async_trait::async_trait;

use crate::model::{Profile, User};
use crate::types::UserId;
use crate::upsert::Owned;

/// Errors that can occur during store operations.
///
/// Transient storage failures surface as [`StoreError::Database`] and are
/// neither retried nor masked by the core; they terminate the request.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying storage failure.
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Store contract for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Load every user.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Insert a new user.
    ///
    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Replace an existing user record.
    ///
    /// Fails with [`StoreError::NotFound`] when no record exists for the
    /// user's id, and [`StoreError::Conflict`] when the new username is
    /// taken by someone else.
    async fn update(&self, user: User) -> Result<User, StoreError>;

    /// Delete a user and, cascading, their address and profile.
    ///
    /// Fails with [`StoreError::NotFound`] when no record exists.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}

/// Store contract for a one-per-owner dependent record.
///
/// [`save`](OwnedStore::save) persists by the record's identifier: a
/// record without one is inserted fresh (the store assigns the id), a
/// record with one is updated in place.
#[async_trait]
pub trait OwnedStore<R: Owned>: Send + Sync {
    /// Load the owner's record, if any exists.
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<R>, StoreError>;

    /// Persist the record and return it with its stable identifier.
    async fn save(&self, record: R) -> Result<R, StoreError>;
}

/// Store contract for profiles: the owned-record operations plus the full
/// listing that feeds the public projection.
#[async_trait]
pub trait ProfileStore: OwnedStore<Profile> {
    /// Load every profile.
    async fn list_all(&self) -> Result<Vec<Profile>, StoreError>;
}

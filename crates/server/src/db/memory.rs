//! In-memory store implementations for tests.
//!
//! Mirror the `PostgreSQL` stores' observable behaviour: unique
//! usernames, one address/profile per owner, cascading deletes, and
//! store-assigned identifiers.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use palisade_core::model::{Address, Profile, User};
use palisade_core::store::{OwnedStore, ProfileStore, StoreError, UserStore};
use palisade_core::types::{AddressId, ProfileId, UserId};

use crate::state::Stores;

/// Assemble a full in-memory store set sharing one backing map.
#[must_use]
pub fn memory_stores() -> Stores {
    let users = Arc::new(MemoryUserStore::default());
    let addresses = Arc::new(MemoryAddressStore::default());
    let profiles = Arc::new(MemoryProfileStore::default());
    users.set_cascade(addresses.clone(), profiles.clone());
    Stores {
        users,
        addresses,
        profiles,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// In-memory [`UserStore`].
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<HashMap<UserId, User>>,
    cascade: Mutex<Option<(Arc<MemoryAddressStore>, Arc<MemoryProfileStore>)>>,
}

impl MemoryUserStore {
    fn set_cascade(&self, addresses: Arc<MemoryAddressStore>, profiles: Arc<MemoryProfileStore>) {
        *lock(&self.cascade) = Some((addresses, profiles));
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.rows).get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = lock(&self.rows).values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut rows = lock(&self.rows);
        if rows.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("username already exists".to_owned()));
        }
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let mut rows = lock(&self.rows);
        if !rows.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        if rows
            .values()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(StoreError::Conflict("username already exists".to_owned()));
        }
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        if lock(&self.rows).remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        if let Some((addresses, profiles)) = lock(&self.cascade).clone() {
            lock(&addresses.rows).remove(&id);
            lock(&profiles.rows).remove(&id);
        }
        Ok(())
    }
}

/// In-memory address store.
#[derive(Default)]
pub struct MemoryAddressStore {
    rows: Mutex<HashMap<UserId, Address>>,
    next_id: AtomicI64,
}

#[async_trait]
impl OwnedStore<Address> for MemoryAddressStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<Address>, StoreError> {
        Ok(lock(&self.rows).get(&owner).cloned())
    }

    async fn save(&self, mut record: Address) -> Result<Address, StoreError> {
        let owner = record
            .owner
            .ok_or_else(|| StoreError::DataCorruption("address without owner".to_owned()))?;
        if record.id.is_none() {
            record.id = Some(AddressId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1));
        }
        lock(&self.rows).insert(owner, record.clone());
        Ok(record)
    }
}

/// In-memory profile store.
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Mutex<HashMap<UserId, Profile>>,
    next_id: AtomicI64,
}

#[async_trait]
impl OwnedStore<Profile> for MemoryProfileStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(lock(&self.rows).get(&owner).cloned())
    }

    async fn save(&self, mut record: Profile) -> Result<Profile, StoreError> {
        let owner = record
            .owner
            .ok_or_else(|| StoreError::DataCorruption("profile without owner".to_owned()))?;
        if record.id.is_none() {
            record.id = Some(ProfileId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1));
        }
        lock(&self.rows).insert(owner, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn list_all(&self) -> Result<Vec<Profile>, StoreError> {
        let mut profiles: Vec<Profile> = lock(&self.rows).values().cloned().collect();
        profiles.sort_by_key(|p| p.id.map(|id| id.as_i64()));
        Ok(profiles)
    }
}

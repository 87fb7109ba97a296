//! Create-or-merge semantics for one-per-owner records.
//!
//! Address and profile are strictly one-per-owner: repeated submissions
//! must overwrite the existing record under its original identifier, not
//! accumulate rows. This module owns that merge decision; the store
//! collaborator owns atomicity between the read and the write.

use crate::store::{OwnedStore, StoreError};
use crate::types::UserId;

/// A dependent record owned by exactly one user.
pub trait Owned: Send {
    /// Attach the owner link. Called once, when the record is created.
    fn set_owner(&mut self, owner: UserId);

    /// Discard any client-supplied identifier so the store assigns a
    /// fresh one.
    fn clear_id(&mut self);

    /// Copy every mutable content field from `incoming` onto `self` in
    /// place. Implementations must never touch the identifier or the
    /// owner link.
    fn merge_from(&mut self, incoming: &Self);
}

/// Create or update the owner's record from client-submitted content.
///
/// If a record already exists for `owner`, the incoming content is merged
/// onto it and the existing identifier survives - upserting twice with
/// the same content yields the same identifier both times. Otherwise the
/// incoming record gets the owner link attached and is inserted fresh
/// (any identifier the client sent along is ignored).
///
/// Concurrent upserts for the same owner are not serialised here; the
/// store's isolation model governs them.
///
/// # Errors
///
/// Propagates any [`StoreError`] from the load or the save.
pub async fn upsert_owned<R, S>(
    store: &S,
    owner: UserId,
    mut incoming: R,
) -> Result<R, StoreError>
where
    R: Owned,
    S: OwnedStore<R> + ?Sized,
{
    match store.find_by_owner(owner).await? {
        Some(mut existing) => {
            existing.merge_from(&incoming);
            store.save(existing).await
        }
        None => {
            incoming.clear_id();
            incoming.set_owner(owner);
            store.save(incoming).await
        }
    }
}

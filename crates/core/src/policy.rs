//! Authorization decision predicates.
//!
//! All predicates are pure: no I/O, no store access. Callers must check
//! the relevant predicate *before* loading anything, so a denied actor
//! never learns whether the target resource exists.
//!
//! The predicates are kept as separate named functions rather than one
//! parameterised check because the admin override differs per operation:
//! reads and deletes allow it, updates and owned-resource writes do not.
//! That asymmetry is load-bearing; collapsing the functions risks
//! silently moving a security boundary.

use crate::identity::IdentityContext;
use crate::types::UserId;

/// May `actor` read the user record identified by `target`?
///
/// Owners may read themselves; admins may read anyone.
#[must_use]
pub fn can_read_user(actor: &IdentityContext, target: UserId) -> bool {
    actor.subject() == target || actor.is_admin()
}

/// May `actor` list every user record?
///
/// Admin-only; no ownership concept applies to a full listing.
#[must_use]
pub fn can_list_all_users(actor: &IdentityContext) -> bool {
    actor.is_admin()
}

/// May `actor` modify the user record identified by `target`?
///
/// Strictly self-service: the administrative role does NOT grant write
/// access to another user's record.
#[must_use]
pub fn can_modify_user(actor: &IdentityContext, target: UserId) -> bool {
    actor.subject() == target
}

/// May `actor` delete the user record identified by `target`?
///
/// Owners may delete themselves; admins may delete anyone.
#[must_use]
pub fn can_delete_user(actor: &IdentityContext, target: UserId) -> bool {
    actor.subject() == target || actor.is_admin()
}

/// May `actor` create, update, or read an owned sub-resource (address,
/// profile) belonging to `target`?
///
/// Owner-only; no admin override.
#[must_use]
pub fn can_manage_owned_resource(actor: &IdentityContext, target: UserId) -> bool {
    actor.subject() == target
}

//! The user account entity.

use std::collections::HashSet;

use secrecy::SecretString;

use crate::types::{Role, UserId};

/// A user account (domain type).
///
/// The password is opaque to this service and wrapped in a
/// [`SecretString`]: it is accepted on create/update, handed to the store
/// as-is, and never serialized outward (the wrapper implements
/// `Deserialize` but deliberately not `Serialize`).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user id.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Globally unique login name.
    pub username: String,
    /// Opaque credential material; never exposed outward.
    pub password: SecretString,
    /// Granted privilege roles.
    pub roles: HashSet<Role>,
}

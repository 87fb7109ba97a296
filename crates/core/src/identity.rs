//! Per-request actor identity derived from a verified token.
//!
//! Token verification itself is an external collaborator's job: by the
//! time this module runs, signature and expiry have already been checked.
//! What arrives here is a [`VerifiedClaims`] value, and what leaves is an
//! immutable [`IdentityContext`] used by every authorization decision for
//! the rest of the request.

use std::collections::HashSet;

use crate::types::{Role, UserId};

/// Claims handed over by the token-verification boundary.
///
/// `subject` is the `userId` claim (absent when the token carries none or
/// it failed to parse as a UUID); `scopes` are the raw scope strings.
/// Everything else the token carries stays behind the verification
/// boundary; authorization needs nothing but these two.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    /// The subject user's id, if the token carried a well-formed one.
    pub subject: Option<UserId>,
    /// Raw scope strings from the token's `scp` claim.
    pub scopes: Vec<String>,
}

/// Errors deriving an identity from verified claims.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The token lacks a usable subject claim; the caller is treated as
    /// unauthenticated.
    #[error("token is missing a usable subject claim")]
    MalformedIdentity,
}

/// The actor for the current request: subject id plus granted roles.
///
/// Built once per request and discarded with it; never persisted.
#[derive(Debug, Clone)]
pub struct IdentityContext {
    subject: UserId,
    roles: HashSet<Role>,
}

impl IdentityContext {
    /// Build an identity directly from a subject and roles.
    #[must_use]
    pub fn new(subject: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            subject,
            roles: roles.into_iter().collect(),
        }
    }

    /// Derive the actor identity from verified token claims.
    ///
    /// Unknown scope names are dropped; roles this service does not define
    /// grant nothing.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedIdentity`] when the subject claim
    /// is absent.
    pub fn derive(claims: &VerifiedClaims) -> Result<Self, IdentityError> {
        let subject = claims.subject.ok_or(IdentityError::MalformedIdentity)?;
        let roles = claims
            .scopes
            .iter()
            .filter_map(|scope| Role::parse(scope))
            .collect();
        Ok(Self { subject, roles })
    }

    /// The subject user's id.
    #[must_use]
    pub const fn subject(&self) -> UserId {
        self.subject
    }

    /// Whether this actor was granted `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether this actor holds the administrative role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

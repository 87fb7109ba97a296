//! Privilege roles granted to a user.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A named privilege tag carried in a user's token scopes.
///
/// The set of roles is closed on purpose: every authorization rule in
/// [`crate::policy`] matches on this enum instead of comparing claim
/// strings at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A regular account holder.
    User,
    /// Administrative access: elevated read/delete across all users.
    Admin,
}

impl Role {
    /// Parse a role from its wire name.
    ///
    /// Returns `None` for unknown names; tokens may carry scopes this
    /// service does not recognise and those are ignored, not rejected.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// The wire name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    }

    #[test]
    fn parse_ignores_unknown_and_case() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("SUPERUSER"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn round_trips_wire_name() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}

//! The profile entity and its public projection.

use serde::Serialize;

use crate::types::{ProfileId, UserId};
use crate::upsert::Owned;

/// A user's profile (domain type): at most one per user.
///
/// Both fields are individually optional, but an entirely empty profile
/// is rejected by [`Profile::is_acceptable`] before any persistence
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Identifier assigned by the store; `None` until persisted.
    pub id: Option<ProfileId>,
    /// Free-form biography text.
    pub bio: Option<String>,
    /// Display nickname.
    pub nickname: Option<String>,
    /// The owning user; set by the upsert when the record is created.
    pub owner: Option<UserId>,
}

impl Profile {
    /// Domain rule for acceptable profile content: at least one of bio
    /// and nickname must contain a non-whitespace character.
    ///
    /// Distinct from field-presence validation; this is checked before
    /// authorization-passing writes reach a store.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        has_content(self.bio.as_deref()) || has_content(self.nickname.as_deref())
    }
}

impl Owned for Profile {
    fn set_owner(&mut self, owner: UserId) {
        self.owner = Some(owner);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn merge_from(&mut self, incoming: &Self) {
        self.bio = incoming.bio.clone();
        self.nickname = incoming.nickname.clone();
    }
}

/// A public-safe, read-only projection of a [`Profile`].
///
/// Carries content fields only: the identifier and owner link are dropped
/// unconditionally. Never persisted; computed on read.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    /// Free-form biography text.
    pub bio: Option<String>,
    /// Display nickname.
    pub nickname: Option<String>,
}

impl From<&Profile> for PublicProfile {
    fn from(profile: &Profile) -> Self {
        Self {
            bio: profile.bio.clone(),
            nickname: profile.nickname.clone(),
        }
    }
}

fn has_content(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(bio: Option<&str>, nickname: Option<&str>) -> Profile {
        Profile {
            id: None,
            bio: bio.map(str::to_owned),
            nickname: nickname.map(str::to_owned),
            owner: None,
        }
    }

    #[test]
    fn empty_profiles_are_unacceptable() {
        assert!(!profile(None, None).is_acceptable());
        assert!(!profile(Some(""), Some("")).is_acceptable());
        assert!(!profile(Some("   "), Some("\t\n")).is_acceptable());
    }

    #[test]
    fn either_field_with_content_is_acceptable() {
        assert!(profile(Some("likes hiking"), None).is_acceptable());
        assert!(profile(None, Some("hiker42")).is_acceptable());
        assert!(profile(Some(""), Some("hiker42")).is_acceptable());
    }

    #[test]
    fn projection_drops_id_and_owner() {
        let mut full = profile(Some("a bio"), Some("nick"));
        full.id = Some(ProfileId::new(1));
        full.owner = Some(UserId::random());

        let public = PublicProfile::from(&full);
        assert_eq!(public.bio.as_deref(), Some("a bio"));
        assert_eq!(public.nickname.as_deref(), Some("nick"));

        // The serialized form must not leak identifiers either.
        let json = serde_json::to_value(&public).expect("serializable");
        let object = json.as_object().expect("object");
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("owner"));
    }
}

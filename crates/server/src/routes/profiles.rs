//! Profile route handlers.
//!
//! The full profile is self-service only; the public listing strips a
//! profile down to its shareable fields and is open to any
//! authenticated caller.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use palisade_core::model::{Profile, PublicProfile};
use palisade_core::store::{OwnedStore, StoreError};
use palisade_core::types::{ProfileId, UserId};
use palisade_core::upsert::upsert_owned;

use crate::{error::AppError, middleware::auth::RequireIdentity, state::AppState};

use super::addresses::ensure_user_exists;
use super::users::require_self;

const EMPTY_PROFILE: &str = "Bio and nickname cannot be null.";

/// Build the profiles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/profile",
            put(save_profile).get(get_profile),
        )
        .route("/users/public-profiles", get(list_public_profiles))
}

/// Request body for saving a profile. Either field may be omitted, but
/// not both.
#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl From<ProfilePayload> for Profile {
    fn from(payload: ProfilePayload) -> Self {
        Self {
            id: None,
            bio: payload.bio,
            nickname: payload.nickname,
            owner: None,
        }
    }
}

/// Outward view of the owner's own profile. The owner id stays internal.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub bio: Option<String>,
    pub nickname: Option<String>,
}

impl ProfileResponse {
    /// A saved record always carries a store-assigned id; one without it
    /// is corrupt store output, not a client mistake.
    fn try_from_record(profile: Profile) -> Result<Self, AppError> {
        let id = profile.id.ok_or_else(|| {
            AppError::Store(StoreError::DataCorruption(
                "saved profile is missing an id".to_owned(),
            ))
        })?;
        Ok(Self {
            id,
            bio: profile.bio,
            nickname: profile.nickname,
        })
    }
}

/// Create or replace the caller's profile.
///
/// # Errors
///
/// `Forbidden` when the path names another user; a 400 when both bio and
/// nickname are blank; `NotFound` when the account does not exist.
pub async fn save_profile(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<ProfileResponse>, AppError> {
    let owner = UserId::new(user_id);
    require_self(&actor, owner)?;

    let profile = Profile::from(payload);
    if !profile.is_acceptable() {
        return Err(AppError::InvalidDomainData(EMPTY_PROFILE.to_owned()));
    }

    ensure_user_exists(&state, owner).await?;

    let store: &dyn OwnedStore<Profile> = state.profiles();
    let saved = upsert_owned(store, owner, profile).await?;
    ProfileResponse::try_from_record(saved).map(Json)
}

/// Fetch the caller's profile.
///
/// # Errors
///
/// `Forbidden` when the path names another user; `NotFound` when no
/// profile has been saved yet.
pub async fn get_profile(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let owner = UserId::new(user_id);
    require_self(&actor, owner)?;

    let profile = state
        .profiles()
        .find_by_owner(owner)
        .await?
        .ok_or_else(|| AppError::NotFound("Entity does not exist".to_owned()))?;

    ProfileResponse::try_from_record(profile).map(Json)
}

/// List every profile's shareable fields.
///
/// Any authenticated caller may browse these; ids and owner links never
/// appear in the projection.
pub async fn list_public_profiles(
    RequireIdentity(_actor): RequireIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicProfile>>, AppError> {
    let profiles = state.profiles().list_all().await?;
    Ok(Json(profiles.iter().map(PublicProfile::from).collect()))
}

//! Address route handlers.
//!
//! An address is strictly self-service: only the account it belongs to
//! may write or read it, admin role notwithstanding.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use palisade_core::model::Address;
use palisade_core::store::StoreError;
use palisade_core::types::{AddressId, UserId};
use palisade_core::upsert::upsert_owned;
use palisade_core::validate::validate_address;

use crate::{error::AppError, middleware::auth::RequireIdentity, state::AppState};

use super::users::require_self;

/// Build the addresses router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/users/{user_id}/address",
        put(save_address).get(get_address),
    )
}

/// Request body for saving an address.
///
/// Carries no id and no owner: both are decided server-side from the
/// path and from whatever record already exists.
#[derive(Debug, Deserialize)]
pub struct AddressPayload {
    pub street_address: String,
    pub apartment_number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Self {
            id: None,
            street_address: payload.street_address,
            apartment_number: payload.apartment_number,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
            owner: None,
        }
    }
}

/// Outward view of an address. The owner id stays internal.
#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub id: AddressId,
    pub street_address: String,
    pub apartment_number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressResponse {
    /// A saved record always carries a store-assigned id; one without it
    /// is corrupt store output, not a client mistake.
    fn try_from_record(address: Address) -> Result<Self, AppError> {
        let id = address.id.ok_or_else(|| {
            AppError::Store(StoreError::DataCorruption(
                "saved address is missing an id".to_owned(),
            ))
        })?;
        Ok(Self {
            id,
            street_address: address.street_address,
            apartment_number: address.apartment_number,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
        })
    }
}

/// Create or replace the caller's address.
///
/// The first save creates the record; every later save overwrites it in
/// place, keeping the stored id.
///
/// # Errors
///
/// `Forbidden` when the path names another user; field-validation errors
/// for blank fields; `NotFound` when the account does not exist.
pub async fn save_address(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AddressPayload>,
) -> Result<Json<AddressResponse>, AppError> {
    let owner = UserId::new(user_id);
    require_self(&actor, owner)?;

    let address = Address::from(payload);
    let errors = validate_address(&address);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    ensure_user_exists(&state, owner).await?;

    let saved = upsert_owned(state.addresses(), owner, address).await?;
    AddressResponse::try_from_record(saved).map(Json)
}

/// Fetch the caller's address.
///
/// # Errors
///
/// `Forbidden` when the path names another user; `NotFound` when no
/// address has been saved yet.
pub async fn get_address(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AddressResponse>, AppError> {
    let owner = UserId::new(user_id);
    require_self(&actor, owner)?;

    let address = state
        .addresses()
        .find_by_owner(owner)
        .await?
        .ok_or_else(|| AppError::NotFound("Entity does not exist".to_owned()))?;

    AddressResponse::try_from_record(address).map(Json)
}

/// Resolve the owning account before attaching a resource to it.
pub(crate) async fn ensure_user_exists(state: &AppState, owner: UserId) -> Result<(), AppError> {
    state
        .users()
        .find_by_id(owner)
        .await?
        .map(drop)
        .ok_or_else(|| AppError::NotFound("Entity does not exist".to_owned()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn idless_saved_address_is_a_server_side_failure() {
        let record = Address {
            id: None,
            street_address: "1 Main St".to_owned(),
            apartment_number: "4a".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            postal_code: "62701".to_owned(),
            owner: Some(UserId::random()),
        };

        let error = AddressResponse::try_from_record(record).expect_err("id is missing");
        assert!(matches!(
            error,
            AppError::Store(StoreError::DataCorruption(_))
        ));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! User account route handlers.

use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use palisade_core::model::User;
use palisade_core::store::StoreError;
use palisade_core::types::{Role, UserId};
use palisade_core::validate::{FieldErrors, validate_user};
use palisade_core::{IdentityContext, policy};

use crate::{error::AppError, middleware::auth::RequireIdentity, state::AppState};

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Request body for creating or updating a user.
///
/// The password arrives wrapped in a `SecretString`: deserializable,
/// never serializable, so it cannot leak back out through this module.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: SecretString,
    #[serde(default)]
    pub roles: HashSet<Role>,
}

impl UserPayload {
    /// Build the domain record under `id`.
    ///
    /// Accounts created without an explicit role get the regular-user
    /// role.
    fn into_user(self, id: UserId) -> User {
        let roles = if self.roles.is_empty() {
            HashSet::from([Role::User])
        } else {
            self.roles
        };
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            password: self.password,
            roles,
        }
    }
}

/// Outward view of a user; the password field does not exist here.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub roles: Vec<Role>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let mut roles: Vec<Role> = user.roles.iter().copied().collect();
        roles.sort_by_key(Role::as_str);
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            roles,
        }
    }
}

/// Register a new account. The one open endpoint.
///
/// # Errors
///
/// Field-validation errors as a field-to-message map; a taken username
/// reports the same way.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = payload.into_user(UserId::random());

    let errors = validate_user(&user);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let created = state
        .users()
        .create(user)
        .await
        .map_err(username_conflict_as_field_error)?;

    tracing::info!(user_id = %created.id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&created))))
}

/// List every account. Admin-only.
///
/// # Errors
///
/// `Forbidden` for non-admin actors.
pub async fn list_users(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    if !policy::can_list_all_users(&actor) {
        return Err(AppError::Forbidden);
    }

    let users = state.users().list_all().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Fetch one account. Owner or admin.
///
/// # Errors
///
/// `Forbidden` before any load for unauthorized actors; `NotFound` when
/// the account does not exist.
pub async fn get_user(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let target = UserId::new(user_id);
    if !policy::can_read_user(&actor, target) {
        return Err(AppError::Forbidden);
    }

    let user = state
        .users()
        .find_by_id(target)
        .await?
        .ok_or_else(|| AppError::NotFound("Entity does not exist".to_owned()))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Replace an account's fields. Strictly self-service; the path id wins
/// over anything in the body.
///
/// # Errors
///
/// `Forbidden` for any actor other than the target user; field-validation
/// errors; `NotFound` when the account does not exist.
pub async fn update_user(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserResponse>, AppError> {
    let target = UserId::new(user_id);
    if !policy::can_modify_user(&actor, target) {
        return Err(AppError::Forbidden);
    }

    // The record is keyed by the path id so no other user can be touched.
    let user = payload.into_user(target);

    let errors = validate_user(&user);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let updated = state
        .users()
        .update(user)
        .await
        .map_err(username_conflict_as_field_error)?;

    Ok(Json(UserResponse::from(&updated)))
}

/// Delete an account. Owner or admin; cascades to address and profile.
///
/// # Errors
///
/// `Forbidden` for unauthorized actors; `NotFound` when the account does
/// not exist.
pub async fn delete_user(
    RequireIdentity(actor): RequireIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let target = UserId::new(user_id);
    if !policy::can_delete_user(&actor, target) {
        return Err(AppError::Forbidden);
    }

    state.users().delete(target).await?;
    tracing::info!(user_id = %target, deleted_by = %actor.subject(), "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Require that `actor` is the user identified by `target`.
pub(crate) fn require_self(actor: &IdentityContext, target: UserId) -> Result<(), AppError> {
    if policy::can_manage_owned_resource(actor, target) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// A taken username is reported like any other field violation.
fn username_conflict_as_field_error(error: StoreError) -> AppError {
    match error {
        StoreError::Conflict(message) => {
            AppError::Validation(FieldErrors::from([("username".to_owned(), message)]))
        }
        other => AppError::Store(other),
    }
}

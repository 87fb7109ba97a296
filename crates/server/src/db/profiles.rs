//! Profile store backed by `PostgreSQL`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use palisade_core::model::Profile;
use palisade_core::store::{OwnedStore, ProfileStore, StoreError};
use palisade_core::types::{ProfileId, UserId};

use super::{conflict_on_unique, database};

const OWNER_TAKEN: &str = "user already has a profile";

/// Internal row type for `PostgreSQL` profile queries.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    bio: Option<String>,
    nickname: Option<String>,
    user_id: Uuid,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: Some(ProfileId::new(row.id)),
            bio: row.bio,
            nickname: row.nickname,
            owner: Some(UserId::new(row.user_id)),
        }
    }
}

/// `PostgreSQL`-backed profile store.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Create a new profile store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnedStore<Profile> for PgProfileStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, bio, nickname, user_id FROM profile WHERE user_id = $1",
        )
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(database)?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, record: Profile) -> Result<Profile, StoreError> {
        let owner = record
            .owner
            .ok_or_else(|| StoreError::DataCorruption("profile without owner".to_owned()))?;

        let row = if let Some(id) = record.id {
            sqlx::query_as::<_, ProfileRow>(
                "UPDATE profile SET bio = $2, nickname = $3
                 WHERE id = $1
                 RETURNING id, bio, nickname, user_id",
            )
            .bind(id.as_i64())
            .bind(&record.bio)
            .bind(&record.nickname)
            .fetch_optional(&self.pool)
            .await
            .map_err(database)?
            .ok_or(StoreError::NotFound)?
        } else {
            sqlx::query_as::<_, ProfileRow>(
                "INSERT INTO profile (bio, nickname, user_id)
                 VALUES ($1, $2, $3)
                 RETURNING id, bio, nickname, user_id",
            )
            .bind(&record.bio)
            .bind(&record.nickname)
            .bind(owner.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, OWNER_TAKEN))?
        };

        Ok(row.into())
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn list_all(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, bio, nickname, user_id FROM profile ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

//! User store backed by `PostgreSQL`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

use palisade_core::model::User;
use palisade_core::store::{StoreError, UserStore};
use palisade_core::types::{Role, UserId};

use super::{conflict_on_unique, database};

const USERNAME_TAKEN: &str = "username already exists";

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    username: String,
    password: String,
    roles: Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // Unknown role names in storage are dropped, mirroring how token
        // scopes are handled.
        let roles = row.roles.iter().filter_map(|r| Role::parse(r)).collect();
        Self {
            id: UserId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            password: SecretString::from(row.password),
            roles,
        }
    }
}

fn role_names(user: &User) -> Vec<String> {
    let mut names: Vec<String> = user.roles.iter().map(|r| r.as_str().to_owned()).collect();
    names.sort_unstable();
    names
}

/// `PostgreSQL`-backed [`UserStore`].
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, username, password, roles
             FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(database)?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, username, password, roles
             FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, first_name, last_name, username, password, roles)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, first_name, last_name, username, password, roles",
        )
        .bind(user.id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(user.password.expose_secret())
        .bind(role_names(&user))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, USERNAME_TAKEN))?;

        Ok(row.into())
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users
             SET first_name = $2, last_name = $3, username = $4, password = $5, roles = $6
             WHERE id = $1
             RETURNING id, first_name, last_name, username, password, roles",
        )
        .bind(user.id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(user.password.expose_secret())
        .bind(role_names(&user))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, USERNAME_TAKEN))?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        // Address and profile rows cascade via their foreign keys.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(database)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

//! Address store backed by `PostgreSQL`.
//!
//! The `address.user_id` column carries a unique constraint, so the
//! one-per-owner invariant holds at the storage layer as well as in the
//! upsert logic.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use palisade_core::model::Address;
use palisade_core::store::{OwnedStore, StoreError};
use palisade_core::types::{AddressId, UserId};

use super::{conflict_on_unique, database};

const OWNER_TAKEN: &str = "user already has an address";

/// Internal row type for `PostgreSQL` address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i64,
    street_address: String,
    apartment_number: String,
    city: String,
    state: String,
    postal_code: String,
    user_id: Uuid,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: Some(AddressId::new(row.id)),
            street_address: row.street_address,
            apartment_number: row.apartment_number,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            owner: Some(UserId::new(row.user_id)),
        }
    }
}

/// `PostgreSQL`-backed address store.
pub struct PgAddressStore {
    pool: PgPool,
}

impl PgAddressStore {
    /// Create a new address store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnedStore<Address> for PgAddressStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<Address>, StoreError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT id, street_address, apartment_number, city, state, postal_code, user_id
             FROM address WHERE user_id = $1",
        )
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(database)?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, record: Address) -> Result<Address, StoreError> {
        let owner = record
            .owner
            .ok_or_else(|| StoreError::DataCorruption("address without owner".to_owned()))?;

        let row = if let Some(id) = record.id {
            sqlx::query_as::<_, AddressRow>(
                "UPDATE address
                 SET street_address = $2, apartment_number = $3, city = $4,
                     state = $5, postal_code = $6
                 WHERE id = $1
                 RETURNING id, street_address, apartment_number, city, state,
                           postal_code, user_id",
            )
            .bind(id.as_i64())
            .bind(&record.street_address)
            .bind(&record.apartment_number)
            .bind(&record.city)
            .bind(&record.state)
            .bind(&record.postal_code)
            .fetch_optional(&self.pool)
            .await
            .map_err(database)?
            .ok_or(StoreError::NotFound)?
        } else {
            sqlx::query_as::<_, AddressRow>(
                "INSERT INTO address
                     (street_address, apartment_number, city, state, postal_code, user_id)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, street_address, apartment_number, city, state,
                           postal_code, user_id",
            )
            .bind(&record.street_address)
            .bind(&record.apartment_number)
            .bind(&record.city)
            .bind(&record.state)
            .bind(&record.postal_code)
            .bind(owner.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, OWNER_TAKEN))?
        };

        Ok(row.into())
    }
}

//! The postal address entity: at most one per user.

use crate::types::{AddressId, UserId};
use crate::upsert::Owned;

/// A user's postal address (domain type).
///
/// Every field is required when an address exists at all; partial
/// addresses are rejected by validation before they reach a store.
/// `id` and `owner` are `None` on a client-submitted record and assigned
/// by the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Identifier assigned by the store; `None` until persisted.
    pub id: Option<AddressId>,
    /// Street name and number.
    pub street_address: String,
    /// Apartment or unit number.
    pub apartment_number: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// The owning user; set by the upsert when the record is created.
    pub owner: Option<UserId>,
}

impl Owned for Address {
    fn set_owner(&mut self, owner: UserId) {
        self.owner = Some(owner);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn merge_from(&mut self, incoming: &Self) {
        self.street_address = incoming.street_address.clone();
        self.apartment_number = incoming.apartment_number.clone();
        self.city = incoming.city.clone();
        self.state = incoming.state.clone();
        self.postal_code = incoming.postal_code.clone();
    }
}

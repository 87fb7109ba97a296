//! Field-level validation rules.
//!
//! A small rule-evaluation step producing an ordered field-to-message
//! map. Kept separate from the profile acceptability rule in
//! [`crate::model::profile`], which is a domain rule evaluated earlier,
//! not a per-field presence check.

use std::collections::BTreeMap;

use secrecy::ExposeSecret;

use crate::model::{Address, User};

/// Per-field constraint violations, keyed by serialized field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Evaluate the required-field rules for a user record.
///
/// Returns an empty map when the record is valid.
#[must_use]
pub fn validate_user(user: &User) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "first_name", &user.first_name, "first name cannot be blank");
    require(&mut errors, "last_name", &user.last_name, "last name cannot be blank");
    require(&mut errors, "username", &user.username, "username cannot be blank");
    require(
        &mut errors,
        "password",
        user.password.expose_secret(),
        "password cannot be blank",
    );
    errors
}

/// Evaluate the required-field rules for an address record.
///
/// A partial address is invalid: every field must be non-blank.
#[must_use]
pub fn validate_address(address: &Address) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(
        &mut errors,
        "street_address",
        &address.street_address,
        "Street address is required.",
    );
    require(
        &mut errors,
        "apartment_number",
        &address.apartment_number,
        "Apartment number cannot be left blank.",
    );
    require(&mut errors, "city", &address.city, "City is required.");
    require(&mut errors, "state", &address.state, "State is required.");
    require(
        &mut errors,
        "postal_code",
        &address.postal_code,
        "Postal code is required.",
    );
    errors
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_owned(), message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use secrecy::SecretString;

    use super::*;
    use crate::types::{Role, UserId};

    fn user(first: &str, last: &str, username: &str, password: &str) -> User {
        User {
            id: UserId::random(),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            username: username.to_owned(),
            password: SecretString::from(password),
            roles: HashSet::from([Role::User]),
        }
    }

    fn address(street: &str, apartment: &str) -> Address {
        Address {
            id: None,
            street_address: street.to_owned(),
            apartment_number: apartment.to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            postal_code: "62701".to_owned(),
            owner: None,
        }
    }

    #[test]
    fn valid_user_produces_no_errors() {
        assert!(validate_user(&user("Phil", "Ingwell", "phil", "hunter2")).is_empty());
    }

    #[test]
    fn blank_user_fields_are_reported_per_field() {
        let errors = validate_user(&user("", "  ", "phil", ""));
        assert_eq!(
            errors.get("first_name").map(String::as_str),
            Some("first name cannot be blank")
        );
        assert_eq!(
            errors.get("last_name").map(String::as_str),
            Some("last name cannot be blank")
        );
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("password cannot be blank")
        );
        assert!(!errors.contains_key("username"));
    }

    #[test]
    fn partial_address_is_invalid() {
        let errors = validate_address(&address("", " "));
        assert_eq!(
            errors.get("street_address").map(String::as_str),
            Some("Street address is required.")
        );
        assert_eq!(
            errors.get("apartment_number").map(String::as_str),
            Some("Apartment number cannot be left blank.")
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn complete_address_is_valid() {
        assert!(validate_address(&address("1 Main St", "4a")).is_empty());
    }
}

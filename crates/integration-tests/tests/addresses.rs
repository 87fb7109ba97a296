//! End-to-end tests for the one-address-per-user flow.

use axum::http::StatusCode;
use serde_json::{Value, json};

use palisade_integration_tests::{admin_token, register, send, test_app};

fn address_payload() -> Value {
    json!({
        "street_address": "1 Main St",
        "apartment_number": "4a",
        "city": "Springfield",
        "state": "IL",
        "postal_code": "62701",
    })
}

#[tokio::test]
async fn first_save_creates_and_later_saves_overwrite_in_place() {
    let app = test_app();
    let (phil, token) = register(&app, "phil").await;
    let uri = format!("/users/{phil}/address");

    let (status, first) = send(&app, "PUT", &uri, Some(&token), Some(&address_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["city"], "Springfield");
    let first_id = first["id"].clone();
    assert!(first_id.is_number());

    let mut changed = address_payload();
    changed["city"] = json!("Shelbyville");
    let (status, second) = send(&app, "PUT", &uri, Some(&token), Some(&changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["city"], "Shelbyville");
    assert_eq!(second["id"], first_id, "overwrite must keep the stored id");

    let (status, fetched) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["city"], "Shelbyville");
    assert_eq!(fetched["id"], first_id);
}

#[tokio::test]
async fn address_responses_never_expose_the_owner() {
    let app = test_app();
    let (phil, token) = register(&app, "phil").await;
    let uri = format!("/users/{phil}/address");

    let (_, body) = send(&app, "PUT", &uri, Some(&token), Some(&address_payload())).await;
    let keys = body.as_object().expect("address is an object");
    assert!(!keys.contains_key("owner"));
    assert!(!keys.contains_key("user_id"));
}

#[tokio::test]
async fn partial_address_is_rejected_per_field() {
    let app = test_app();
    let (phil, token) = register(&app, "phil").await;

    let mut payload = address_payload();
    payload["street_address"] = json!("");
    payload["apartment_number"] = json!("   ");
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{phil}/address"),
        Some(&token),
        Some(&payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["street_address"], "Street address is required.");
    assert_eq!(
        body["apartment_number"],
        "Apartment number cannot be left blank."
    );
    assert!(body.get("city").is_none());
}

#[tokio::test]
async fn address_is_owner_only_even_for_admins() {
    let app = test_app();
    let (phil, phil_token) = register(&app, "phil").await;
    let (_, anna_token) = register(&app, "anna").await;
    let uri = format!("/users/{phil}/address");

    send(&app, "PUT", &uri, Some(&phil_token), Some(&address_payload())).await;

    for token in [anna_token, admin_token()] {
        let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "PUT", &uri, Some(&token), Some(&address_payload())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn reading_before_any_save_is_not_found() {
    let app = test_app();
    let (phil, token) = register(&app, "phil").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/users/{phil}/address"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Data not found");
}

#[tokio::test]
async fn two_users_keep_separate_addresses() {
    let app = test_app();
    let (phil, phil_token) = register(&app, "phil").await;
    let (anna, anna_token) = register(&app, "anna").await;

    send(
        &app,
        "PUT",
        &format!("/users/{phil}/address"),
        Some(&phil_token),
        Some(&address_payload()),
    )
    .await;

    let mut other = address_payload();
    other["city"] = json!("Capital City");
    send(
        &app,
        "PUT",
        &format!("/users/{anna}/address"),
        Some(&anna_token),
        Some(&other),
    )
    .await;

    let (_, phil_addr) = send(
        &app,
        "GET",
        &format!("/users/{phil}/address"),
        Some(&phil_token),
        None,
    )
    .await;
    let (_, anna_addr) = send(
        &app,
        "GET",
        &format!("/users/{anna}/address"),
        Some(&anna_token),
        None,
    )
    .await;

    assert_eq!(phil_addr["city"], "Springfield");
    assert_eq!(anna_addr["city"], "Capital City");
    assert_ne!(phil_addr["id"], anna_addr["id"]);
}

#[tokio::test]
async fn deleting_the_user_removes_the_address() {
    let app = test_app();
    let (phil, token) = register(&app, "phil").await;
    let uri = format!("/users/{phil}/address");

    send(&app, "PUT", &uri, Some(&token), Some(&address_payload())).await;

    let (status, _) = send(&app, "DELETE", &format!("/users/{phil}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The token is still valid, but the row (and its address) are gone.
    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Input validation tests.
//!
//! Each request here is rejected by validation code that runs before any
//! database access.

use http::StatusCode;
use serde_json::json;

use foodbridge_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_rejects_admin_role() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "wannabe",
                "password": "password123",
                "role": "admin"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_register_rejects_unknown_role() {
    let app = TestApp::new();

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "someone",
                "password": "password123",
                "role": "courier"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "someone",
                "password": "short",
                "role": "donor"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("at least 8")
    );
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let app = TestApp::new();

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "ab",
                "password": "password123",
                "role": "ngo"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_donation_rejects_bad_times() {
    let app = TestApp::new();
    let donor_token = app.mint_token(UserRole::Donor);

    // Expiry before prepared time.
    let (status, body) = app
        .request(
            "POST",
            "/api/donations",
            Some(&donor_token),
            Some(json!({
                "title": "Leftover rice",
                "quantity": 5.0,
                "unit": "kg",
                "prepared_time": "2026-08-26T12:00:00Z",
                "expiry_time": "2026-08-26T09:00:00Z",
                "pickup_lat": 10.76,
                "pickup_lng": 106.66,
                "pickup_address": "12 Market St"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_create_donation_rejects_nonpositive_quantity() {
    let app = TestApp::new();
    let donor_token = app.mint_token(UserRole::Donor);

    let (status, _) = app
        .request(
            "POST",
            "/api/donations",
            Some(&donor_token),
            Some(json!({
                "title": "Bread",
                "quantity": 0.0,
                "unit": "loaves",
                "prepared_time": "2026-08-26T12:00:00Z",
                "expiry_time": "2030-01-01T00:00:00Z",
                "pickup_lat": 10.76,
                "pickup_lng": 106.66,
                "pickup_address": "12 Market St"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_donation_requires_donor_role() {
    let app = TestApp::new();
    let ngo_token = app.mint_token(UserRole::Ngo);

    let (status, _) = app
        .request(
            "POST",
            "/api/donations",
            Some(&ngo_token),
            Some(json!({
                "title": "Bread",
                "quantity": 1.0,
                "unit": "loaves",
                "prepared_time": "2026-08-26T12:00:00Z",
                "expiry_time": "2030-01-01T00:00:00Z",
                "pickup_lat": 10.76,
                "pickup_lng": 106.66,
                "pickup_address": "12 Market St"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delivery_advance_rejects_completed_target() {
    let app = TestApp::new();
    let volunteer_token = app.mint_token(UserRole::Volunteer);
    let delivery_id = uuid::Uuid::new_v4();

    // 'completed' is reserved for the NGO confirmation endpoint; the
    // target is rejected before the delivery is even looked up.
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/deliveries/{delivery_id}/status"),
            Some(&volunteer_token),
            Some(json!({ "status": "completed" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_delivery_advance_rejects_unknown_status() {
    let app = TestApp::new();
    let volunteer_token = app.mint_token(UserRole::Volunteer);
    let delivery_id = uuid::Uuid::new_v4();

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/deliveries/{delivery_id}/status"),
            Some(&volunteer_token),
            Some(json!({ "status": "sideways" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_location_update_rejects_out_of_range_coordinates() {
    let app = TestApp::new();
    let ngo_token = app.mint_token(UserRole::Ngo);

    let (status, _) = app
        .request(
            "PUT",
            "/api/users/me/location",
            Some(&ngo_token),
            Some(json!({ "lat": 123.0, "lng": 50.0, "address": "1 Shelter Rd" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_location_update_is_ngo_only() {
    let app = TestApp::new();
    let donor_token = app.mint_token(UserRole::Donor);

    let (status, _) = app
        .request(
            "PUT",
            "/api/users/me/location",
            Some(&donor_token),
            Some(json!({ "lat": 10.0, "lng": 50.0, "address": "1 Shelter Rd" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_claims_rejects_unknown_status_filter() {
    let app = TestApp::new();
    let admin_token = app.mint_token(UserRole::Admin);

    let (status, _) = app
        .request(
            "GET",
            "/api/admin/claims?status=sideways",
            Some(&admin_token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

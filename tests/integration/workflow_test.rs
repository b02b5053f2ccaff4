//! End-to-end workflow tests against a live database.
//!
//! These run only when `DATABASE_URL` points at a reachable Postgres;
//! without it every test returns early and reports nothing. Each test
//! registers its own uniquely-named accounts, so the suite can run
//! repeatedly against the same database without cleanup.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

async fn approve_ngo(app: &TestApp, admin: &str, ngo_id: Uuid) {
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/ngos/{ngo_id}/approve"),
            Some(admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

async fn post_donation(app: &TestApp, donor: &str) -> Uuid {
    let now = Utc::now();
    let (status, body) = app
        .request(
            "POST",
            "/api/donations",
            Some(donor),
            Some(json!({
                "title": "Cooked rice trays",
                "quantity": 12.0,
                "unit": "kg",
                "prepared_time": now - Duration::hours(1),
                "expiry_time": now + Duration::hours(6),
                "pickup_lat": 10.762,
                "pickup_lng": 106.66,
                "pickup_address": "12 Market St",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_value(body["data"]["id"].clone()).expect("donation id")
}

async fn submit_claim(app: &TestApp, ngo: &str, donation_id: Uuid) -> Uuid {
    let (status, body) = app
        .request(
            "POST",
            "/api/claims",
            Some(ngo),
            Some(json!({ "donation_id": donation_id, "quantity": 5.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_value(body["data"]["id"].clone()).expect("claim id")
}

async fn donation_status(app: &TestApp, donor: &str, donation_id: Uuid) -> Value {
    let (status, body) = app
        .request(
            "GET",
            &format!("/api/donations/{donation_id}"),
            Some(donor),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["status"].clone()
}

async fn advance_delivery(
    app: &TestApp,
    volunteer: &str,
    delivery_id: Uuid,
    target: &str,
) -> (StatusCode, Value) {
    app.request(
        "PUT",
        &format!("/api/deliveries/{delivery_id}/status"),
        Some(volunteer),
        Some(json!({ "status": target })),
    )
    .await
}

/// Registers all four actors, posts a donation, claims it, approves the
/// claim, and assigns the volunteer. Returns everything the individual
/// tests branch off from.
struct AssignedFlow {
    admin: String,
    donor: String,
    ngo: String,
    volunteer: String,
    donation_id: Uuid,
    claim_id: Uuid,
    delivery_id: Uuid,
}

async fn assigned_flow(app: &TestApp) -> AssignedFlow {
    let admin = app.admin_token().await;
    let (_, donor) = app.register_and_login("donor").await;
    let (ngo_id, ngo) = app.register_and_login("ngo").await;
    let (volunteer_id, volunteer) = app.register_and_login("volunteer").await;
    approve_ngo(app, &admin, ngo_id).await;

    let donation_id = post_donation(app, &donor).await;
    let claim_id = submit_claim(app, &ngo, donation_id).await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/claims/{claim_id}/approve"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/admin/claims/{claim_id}/assign"),
            Some(&admin),
            Some(json!({ "volunteer_id": volunteer_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "assigned");
    let delivery_id = serde_json::from_value(body["data"]["id"].clone()).expect("delivery id");

    AssignedFlow {
        admin,
        donor,
        ngo,
        volunteer,
        donation_id,
        claim_id,
        delivery_id,
    }
}

#[tokio::test]
async fn test_donation_lifecycle_end_to_end() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let flow = assigned_flow(&app).await;

    assert_eq!(
        donation_status(&app, &flow.donor, flow.donation_id).await,
        "approved"
    );

    // The volunteer walks the strict chain; the donation mirrors the
    // transport milestones.
    for target in ["accepted", "picked_up", "reached_ngo"] {
        let (status, body) =
            advance_delivery(&app, &flow.volunteer, flow.delivery_id, target).await;
        assert_eq!(status, StatusCode::OK, "{target}: {body}");
        assert_eq!(body["data"]["status"], target);
    }
    assert_eq!(
        donation_status(&app, &flow.donor, flow.donation_id).await,
        "reached_ngo"
    );

    // Only the NGO confirmation completes the hand-off.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/claims/{}/confirm", flow.claim_id),
            Some(&flow.ngo),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["claim"]["status"], "completed");
    assert_eq!(body["data"]["delivery"]["status"], "completed");
    assert_eq!(body["data"]["donation"]["status"], "completed");
    assert!(body["data"]["delivery"]["completed_at"].is_string());
}

#[tokio::test]
async fn test_first_approved_claim_rejects_pending_siblings() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.admin_token().await;
    let (_, donor) = app.register_and_login("donor").await;
    let (ngo1_id, ngo1) = app.register_and_login("ngo").await;
    let (ngo2_id, ngo2) = app.register_and_login("ngo").await;
    approve_ngo(&app, &admin, ngo1_id).await;
    approve_ngo(&app, &admin, ngo2_id).await;

    let donation_id = post_donation(&app, &donor).await;
    let claim1 = submit_claim(&app, &ngo1, donation_id).await;
    let _claim2 = submit_claim(&app, &ngo2, donation_id).await;
    assert_eq!(
        donation_status(&app, &donor, donation_id).await,
        "requested"
    );

    // A second live claim by the same NGO on the same donation is refused.
    let (status, body) = app
        .request(
            "POST",
            "/api/claims",
            Some(&ngo1),
            Some(json!({ "donation_id": donation_id, "quantity": 3.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["error"], "CONFLICT");

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/claims/{claim1}/approve"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["claim"]["status"], "approved");
    assert_eq!(body["data"]["donation"]["status"], "approved");

    // The losing NGO sees its claim rejected in the same decision.
    let (status, body) = app.request("GET", "/api/claims/mine", Some(&ngo2), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let lost = body["data"]
        .as_array()
        .expect("claims")
        .iter()
        .find(|c| c["donation_id"] == json!(donation_id))
        .expect("sibling claim")
        .clone();
    assert_eq!(lost["status"], "rejected");
    assert!(lost["decision_reason"].is_string());
}

#[tokio::test]
async fn test_rejecting_pending_claim_reopens_donation() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.admin_token().await;
    let (_, donor) = app.register_and_login("donor").await;
    let (ngo_id, ngo) = app.register_and_login("ngo").await;
    approve_ngo(&app, &admin, ngo_id).await;

    let donation_id = post_donation(&app, &donor).await;
    let claim_id = submit_claim(&app, &ngo, donation_id).await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/claims/{claim_id}/reject"),
            Some(&admin),
            Some(json!({ "reason": "Closer NGO available" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["claim"]["status"], "rejected");
    assert_eq!(body["data"]["claim"]["decision_reason"], "Closer NGO available");

    // No approved claim remains, so the donation reopens.
    assert_eq!(
        donation_status(&app, &donor, donation_id).await,
        "available"
    );
}

#[tokio::test]
async fn test_reject_refused_once_volunteer_assigned() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let flow = assigned_flow(&app).await;

    // An approval is reversible only until a volunteer is assigned;
    // afterwards the rejection must be refused so the delivery is never
    // orphaned.
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/claims/{}/reject", flow.claim_id),
            Some(&flow.admin),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["error"], "INVALID_STATE");

    // The claim, the delivery, and the donation are all untouched.
    let (status, body) = app
        .request("GET", "/api/claims/mine", Some(&flow.ngo), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"][0]["status"], "approved");

    let (status, body) = app
        .request("GET", "/api/deliveries/mine", Some(&flow.volunteer), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"][0]["id"], json!(flow.delivery_id));
    assert_eq!(body["data"][0]["status"], "assigned");

    assert_eq!(
        donation_status(&app, &flow.donor, flow.donation_id).await,
        "approved"
    );

    // The volunteer can still run the delivery to completion.
    let (status, body) =
        advance_delivery(&app, &flow.volunteer, flow.delivery_id, "accepted").await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_assignment_requires_volunteer_role_and_is_exclusive() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let flow = assigned_flow(&app).await;
    let (donor_id, _) = app.register_and_login("donor").await;
    let (other_volunteer_id, _) = app.register_and_login("volunteer").await;

    // The claim already has a delivery; a second assignment conflicts.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/admin/claims/{}/assign", flow.claim_id),
            Some(&flow.admin),
            Some(json!({ "volunteer_id": other_volunteer_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["error"], "CONFLICT");

    // A non-volunteer account is a state problem, not an input problem.
    let admin = &flow.admin;
    let (ngo2_id, ngo2) = app.register_and_login("ngo").await;
    approve_ngo(&app, admin, ngo2_id).await;
    let donation_id = post_donation(&app, &flow.donor).await;
    let claim_id = submit_claim(&app, &ngo2, donation_id).await;
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/claims/{claim_id}/approve"),
            Some(admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/admin/claims/{claim_id}/assign"),
            Some(admin),
            Some(json!({ "volunteer_id": donor_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["error"], "INVALID_STATE");
}

#[tokio::test]
async fn test_delivery_chain_rejects_skips_and_early_confirm() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let flow = assigned_flow(&app).await;

    // assigned → picked_up skips the acceptance step.
    let (status, body) =
        advance_delivery(&app, &flow.volunteer, flow.delivery_id, "picked_up").await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["error"], "INVALID_TRANSITION");

    // The NGO cannot confirm before the food has reached it.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/claims/{}/confirm", flow.claim_id),
            Some(&flow.ngo),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["error"], "INVALID_STATE");
}

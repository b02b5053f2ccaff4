//! Request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Requested role: `donor`, `ngo`, or `volunteer`.
    pub role: String,
}

/// Body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Body for `POST /api/donations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonationRequest {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Amount of food.
    pub quantity: f64,
    /// Unit for `quantity`.
    pub unit: String,
    /// When the food was prepared.
    pub prepared_time: DateTime<Utc>,
    /// When the food expires.
    pub expiry_time: DateTime<Utc>,
    /// Pickup latitude.
    pub pickup_lat: f64,
    /// Pickup longitude.
    pub pickup_lng: f64,
    /// Pickup street address.
    pub pickup_address: String,
}

/// Body for `POST /api/claims`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClaimRequest {
    /// The donation to claim.
    pub donation_id: Uuid,
    /// Quantity requested.
    pub quantity: f64,
}

/// Body for rejection endpoints; the reason is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectRequest {
    /// Reason shown to the affected account.
    pub reason: Option<String>,
}

/// Body for `POST /api/admin/claims/{id}/assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignVolunteerRequest {
    /// The volunteer to assign.
    pub volunteer_id: Uuid,
}

/// Body for `PUT /api/deliveries/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeliveryStatusRequest {
    /// Target status: `accepted`, `picked_up`, or `reached_ngo`.
    pub status: String,
}

/// Body for `PUT /api/users/me/location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    /// Drop-off latitude.
    pub lat: f64,
    /// Drop-off longitude.
    pub lng: f64,
    /// Drop-off street address.
    pub address: String,
}

/// Query parameters for the admin claim queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminClaimsQuery {
    /// Optional status filter: `pending`, `approved`, `rejected`,
    /// `completed`, or `cancelled`.
    pub status: Option<String>,
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 25, max: 100).
    pub per_page: Option<u64>,
}

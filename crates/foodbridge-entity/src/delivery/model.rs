//! Delivery entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::DeliveryStatus;

/// A volunteer transport leg for an approved claim.
///
/// Exactly one delivery exists per claim, enforced by a unique index.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Delivery {
    /// Unique delivery identifier.
    pub id: Uuid,
    /// The donation being transported.
    pub donation_id: Uuid,
    /// The approved claim this delivery fulfils.
    pub claim_id: Uuid,
    /// The assigned volunteer.
    pub volunteer_id: Uuid,
    /// Lifecycle status.
    pub status: DeliveryStatus,
    /// When the admin assigned the volunteer.
    pub assigned_at: DateTime<Utc>,
    /// When the volunteer accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// When the food was collected.
    pub picked_up_at: Option<DateTime<Utc>>,
    /// When the food arrived at the NGO.
    pub reached_ngo_at: Option<DateTime<Utc>>,
    /// When the NGO confirmed receipt.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to assign a volunteer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDelivery {
    /// The donation being transported.
    pub donation_id: Uuid,
    /// The approved claim.
    pub claim_id: Uuid,
    /// The volunteer to assign.
    pub volunteer_id: Uuid,
}

/// A delivery joined with pickup and drop-off display fields.
///
/// Read-model only, for the volunteer's task view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeliveryDetail {
    /// Unique delivery identifier.
    pub id: Uuid,
    /// The donation being transported.
    pub donation_id: Uuid,
    /// The approved claim.
    pub claim_id: Uuid,
    /// The assigned volunteer.
    pub volunteer_id: Uuid,
    /// Delivery lifecycle status.
    pub status: DeliveryStatus,
    /// When the admin assigned the volunteer.
    pub assigned_at: DateTime<Utc>,
    /// Donation title.
    pub donation_title: String,
    /// Amount to transport.
    pub donation_quantity: f64,
    /// Unit for the quantity.
    pub donation_unit: String,
    /// Donation expiry time.
    pub donation_expiry_time: DateTime<Utc>,
    /// Pickup latitude.
    pub pickup_lat: f64,
    /// Pickup longitude.
    pub pickup_lng: f64,
    /// Pickup street address.
    pub pickup_address: String,
    /// Donor display name (falls back to username).
    pub donor_name: String,
    /// NGO display name (falls back to username).
    pub ngo_name: String,
    /// NGO drop-off latitude.
    pub dropoff_lat: Option<f64>,
    /// NGO drop-off longitude.
    pub dropoff_lng: Option<f64>,
    /// NGO drop-off street address.
    pub dropoff_address: Option<String>,
}

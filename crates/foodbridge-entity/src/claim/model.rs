//! Claim entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ClaimStatus;
use crate::donation::DonationStatus;

/// An NGO's request for a donation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Claim {
    /// Unique claim identifier.
    pub id: Uuid,
    /// The donation being claimed.
    pub donation_id: Uuid,
    /// The claiming NGO.
    pub ngo_id: Uuid,
    /// Requested amount, in the donation's unit.
    pub quantity: f64,
    /// Lifecycle status.
    pub status: ClaimStatus,
    /// Admin-supplied reason for a rejection.
    pub decision_reason: Option<String>,
    /// When the claim was submitted.
    pub created_at: DateTime<Utc>,
    /// When the claim was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to submit a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClaim {
    /// The donation being claimed.
    pub donation_id: Uuid,
    /// The claiming NGO.
    pub ngo_id: Uuid,
    /// Requested amount.
    pub quantity: f64,
}

/// A claim joined with display fields from its donation.
///
/// Read-model only; decision logic never consults these columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClaimDetail {
    /// Unique claim identifier.
    pub id: Uuid,
    /// The donation being claimed.
    pub donation_id: Uuid,
    /// The claiming NGO.
    pub ngo_id: Uuid,
    /// Requested amount.
    pub quantity: f64,
    /// Claim lifecycle status.
    pub status: ClaimStatus,
    /// Admin-supplied reason for a rejection.
    pub decision_reason: Option<String>,
    /// When the claim was submitted.
    pub created_at: DateTime<Utc>,
    /// Donation title.
    pub donation_title: String,
    /// Donation stored status.
    pub donation_status: DonationStatus,
    /// Donation quantity.
    pub donation_quantity: f64,
    /// Donation unit.
    pub donation_unit: String,
    /// Donation expiry time.
    pub donation_expiry_time: DateTime<Utc>,
    /// Donation pickup address.
    pub donation_pickup_address: String,
}

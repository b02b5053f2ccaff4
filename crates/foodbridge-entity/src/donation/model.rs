//! Donation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::DonationStatus;

/// A posted surplus-food donation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donation {
    /// Unique donation identifier.
    pub id: Uuid,
    /// The donor who posted it.
    pub donor_id: Uuid,
    /// Short title (e.g. "50 veg meals").
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Amount of food.
    pub quantity: f64,
    /// Unit for `quantity` (meals, kg, boxes).
    pub unit: String,
    /// When the food was prepared.
    pub prepared_time: DateTime<Utc>,
    /// When the food is no longer safe to distribute.
    pub expiry_time: DateTime<Utc>,
    /// Pickup latitude.
    pub pickup_lat: f64,
    /// Pickup longitude.
    pub pickup_lng: f64,
    /// Pickup street address.
    pub pickup_address: String,
    /// Stored lifecycle status.
    pub status: DonationStatus,
    /// When the donation was posted.
    pub created_at: DateTime<Utc>,
    /// When the donation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Check whether the expiry time has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time <= now
    }

    /// Status adjusted for expiry.
    ///
    /// A donation past its expiry time that was never picked up reads as
    /// `Expired` even though no sweep ever rewrites the stored row.
    pub fn effective_status(&self, now: DateTime<Utc>) -> DonationStatus {
        if self.status.is_requestable() && self.is_expired_at(now) {
            DonationStatus::Expired
        } else {
            self.status
        }
    }

    /// Whether a new claim may be submitted right now.
    pub fn is_requestable_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_requestable() && !self.is_expired_at(now)
    }
}

/// Data required to post a new donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonation {
    /// The posting donor.
    pub donor_id: Uuid,
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn donation(status: DonationStatus, expiry: DateTime<Utc>) -> Donation {
        let now = Utc::now();
        Donation {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            title: "Surplus rice".to_string(),
            description: None,
            quantity: 10.0,
            unit: "kg".to_string(),
            prepared_time: now - Duration::hours(2),
            expiry_time: expiry,
            pickup_lat: 0.0,
            pickup_lng: 0.0,
            pickup_address: "12 Mill Road".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_effective_status_reports_expiry_lazily() {
        let now = Utc::now();
        let stale = donation(DonationStatus::Available, now - Duration::minutes(1));
        assert_eq!(stale.effective_status(now), DonationStatus::Expired);

        let fresh = donation(DonationStatus::Requested, now + Duration::hours(3));
        assert_eq!(fresh.effective_status(now), DonationStatus::Requested);
    }

    #[test]
    fn test_expiry_does_not_mask_in_flight_statuses() {
        let now = Utc::now();
        let picked = donation(DonationStatus::PickedUp, now - Duration::minutes(1));
        assert_eq!(picked.effective_status(now), DonationStatus::PickedUp);
    }

    #[test]
    fn test_requestable_requires_unexpired() {
        let now = Utc::now();
        let fresh = donation(DonationStatus::Available, now + Duration::hours(1));
        assert!(fresh.is_requestable_at(now));

        let stale = donation(DonationStatus::Available, now - Duration::hours(1));
        assert!(!stale.is_requestable_at(now));

        let approved = donation(DonationStatus::Approved, now + Duration::hours(1));
        assert!(!approved.is_requestable_at(now));
    }
}

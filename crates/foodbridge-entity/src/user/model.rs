//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::approval::ApprovalStatus;
use super::role::UserRole;

/// A registered account on the FoodBridge platform.
///
/// The platform administrator is not stored here; admin authentication is
/// resolved against the fixed configured credential.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Vetting status (meaningful for NGOs).
    pub approval_status: ApprovalStatus,
    /// NGO drop-off latitude.
    pub delivery_lat: Option<f64>,
    /// NGO drop-off longitude.
    pub delivery_lng: Option<f64>,
    /// NGO drop-off street address.
    pub delivery_address: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this account may submit claims.
    pub fn can_claim(&self) -> bool {
        self.role == UserRole::Ngo && self.approval_status == ApprovalStatus::Approved
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Initial vetting status.
    pub approval_status: ApprovalStatus,
}

/// NGO drop-off location update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryLocation {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Street address.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, approval: ApprovalStatus) -> User {
        User {
            id: Uuid::new_v4(),
            username: "hopekitchen".to_string(),
            email: None,
            password_hash: "x".to_string(),
            display_name: None,
            role,
            approval_status: approval,
            delivery_lat: None,
            delivery_lng: None,
            delivery_address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_approved_ngo_can_claim() {
        assert!(user(UserRole::Ngo, ApprovalStatus::Approved).can_claim());
        assert!(!user(UserRole::Ngo, ApprovalStatus::Pending).can_claim());
        assert!(!user(UserRole::Ngo, ApprovalStatus::Rejected).can_claim());
        assert!(!user(UserRole::Donor, ApprovalStatus::Approved).can_claim());
    }
}

//! Donation status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a donation.
///
/// The ledger states `PickedUp` and `ReachedNgo` mirror the active
/// delivery; `Expired` is mostly a display state computed lazily from
/// `expiry_time` at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "donation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    /// Posted, no claims yet.
    Available,
    /// At least one pending claim exists.
    Requested,
    /// A claim was approved; awaiting pickup.
    Approved,
    /// A volunteer collected the food.
    PickedUp,
    /// The food arrived at the NGO drop-off point.
    ReachedNgo,
    /// The NGO confirmed receipt.
    Completed,
    /// Withdrawn by the donor.
    Cancelled,
    /// Expiry time passed before completion.
    Expired,
}

impl DonationStatus {
    /// Whether NGOs may still submit claims in this status.
    pub fn is_requestable(&self) -> bool {
        matches!(self, Self::Available | Self::Requested)
    }

    /// Whether this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Expired)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::PickedUp => "picked_up",
            Self::ReachedNgo => "reached_ngo",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "requested" => Ok(Self::Requested),
            "approved" => Ok(Self::Approved),
            "picked_up" => Ok(Self::PickedUp),
            "reached_ngo" => Ok(Self::ReachedNgo),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid donation status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requestable_states() {
        assert!(DonationStatus::Available.is_requestable());
        assert!(DonationStatus::Requested.is_requestable());
        assert!(!DonationStatus::Approved.is_requestable());
        assert!(!DonationStatus::Completed.is_requestable());
    }

    #[test]
    fn test_terminal_states() {
        assert!(DonationStatus::Expired.is_terminal());
        assert!(DonationStatus::Cancelled.is_terminal());
        assert!(!DonationStatus::PickedUp.is_terminal());
    }
}

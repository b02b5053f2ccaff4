//! Claim status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an NGO claim on a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Admin approved; a delivery may be assigned.
    Approved,
    /// Admin rejected, or lost to a sibling approval.
    Rejected,
    /// NGO confirmed receipt of the delivery.
    Completed,
    /// Withdrawn by the NGO.
    Cancelled,
}

impl ClaimStatus {
    /// Whether the claim still blocks a duplicate from the same NGO.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Whether an admin may still reject this claim.
    pub fn is_rejectable(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid claim status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(ClaimStatus::Pending.is_active());
        assert!(ClaimStatus::Approved.is_active());
        assert!(!ClaimStatus::Rejected.is_active());
        assert!(!ClaimStatus::Completed.is_active());
    }

    #[test]
    fn test_rejectable_from_pending_and_approved() {
        assert!(ClaimStatus::Pending.is_rejectable());
        assert!(ClaimStatus::Approved.is_rejectable());
        assert!(!ClaimStatus::Completed.is_rejectable());
        assert!(!ClaimStatus::Cancelled.is_rejectable());
    }
}

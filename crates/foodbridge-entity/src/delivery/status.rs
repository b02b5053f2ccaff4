//! Delivery status enumeration and transition table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a delivery leg.
///
/// Volunteers advance strictly `Assigned` → `Accepted` → `PickedUp` →
/// `ReachedNgo`; only the receiving NGO's confirmation produces
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "delivery_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Admin assigned a volunteer.
    Assigned,
    /// Volunteer accepted the task.
    Accepted,
    /// Volunteer collected the food from the donor.
    PickedUp,
    /// Volunteer arrived at the NGO drop-off point.
    ReachedNgo,
    /// NGO confirmed receipt.
    Completed,
    /// Task was cancelled.
    Cancelled,
}

impl DeliveryStatus {
    /// Whether a volunteer may move this delivery to `target`.
    ///
    /// The table is strictly linear and never includes `Completed`;
    /// confirmation is the NGO's operation, not the volunteer's.
    pub fn can_advance_to(&self, target: DeliveryStatus) -> bool {
        matches!(
            (self, target),
            (Self::Assigned, Self::Accepted)
                | (Self::Accepted, Self::PickedUp)
                | (Self::PickedUp, Self::ReachedNgo)
        )
    }

    /// Whether this status is a valid target for a volunteer advance.
    pub fn is_volunteer_target(&self) -> bool {
        matches!(self, Self::Accepted | Self::PickedUp | Self::ReachedNgo)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::PickedUp => "picked_up",
            Self::ReachedNgo => "reached_ngo",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assigned" => Ok(Self::Assigned),
            "accepted" => Ok(Self::Accepted),
            "picked_up" => Ok(Self::PickedUp),
            "reached_ngo" => Ok(Self::ReachedNgo),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid delivery status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeliveryStatus::*;

    #[test]
    fn test_linear_chain_is_allowed() {
        assert!(Assigned.can_advance_to(Accepted));
        assert!(Accepted.can_advance_to(PickedUp));
        assert!(PickedUp.can_advance_to(ReachedNgo));
    }

    #[test]
    fn test_skips_and_reversals_are_rejected() {
        assert!(!Assigned.can_advance_to(PickedUp));
        assert!(!Assigned.can_advance_to(ReachedNgo));
        assert!(!Accepted.can_advance_to(Assigned));
        assert!(!ReachedNgo.can_advance_to(PickedUp));
        assert!(!ReachedNgo.can_advance_to(ReachedNgo));
    }

    #[test]
    fn test_volunteer_can_never_complete() {
        for from in [Assigned, Accepted, PickedUp, ReachedNgo, Completed] {
            assert!(!from.can_advance_to(Completed));
        }
        assert!(!Completed.is_volunteer_target());
        assert!(!Cancelled.is_volunteer_target());
        assert!(ReachedNgo.is_volunteer_target());
    }
}

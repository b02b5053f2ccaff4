//! NGO approval status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vetting status of an account.
///
/// Only NGO accounts start as `Pending`; donors and volunteers are
/// `Approved` at registration. The status moves out of `Pending` exactly
/// once, by an admin decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Cleared to use role-gated operations.
    Approved,
    /// Denied; the account cannot act in its role.
    Rejected,
}

impl ApprovalStatus {
    /// Whether an admin decision is still possible.
    pub fn is_decidable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid approval status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_decidable() {
        assert!(ApprovalStatus::Pending.is_decidable());
        assert!(!ApprovalStatus::Approved.is_decidable());
        assert!(!ApprovalStatus::Rejected.is_decidable());
    }
}

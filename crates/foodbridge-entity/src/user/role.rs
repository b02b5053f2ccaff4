//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on the platform.
///
/// Each authenticated request acts in exactly one role; there is no
/// privilege hierarchy between the non-admin roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Posts surplus food donations.
    Donor,
    /// Claims donations for redistribution.
    Ngo,
    /// Transports approved donations.
    Volunteer,
    /// Platform operator with the fixed out-of-band credential.
    Admin,
}

impl UserRole {
    /// Check if this role is the platform administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether accounts with this role can self-register.
    pub fn is_registrable(&self) -> bool {
        !self.is_admin()
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Ngo => "ngo",
            Self::Volunteer => "volunteer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Self::Donor),
            "ngo" => Ok(Self::Ngo),
            "volunteer" => Ok(Self::Volunteer),
            "admin" => Ok(Self::Admin),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: donor, ngo, volunteer, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("donor".parse::<UserRole>().unwrap(), UserRole::Donor);
        assert_eq!("NGO".parse::<UserRole>().unwrap(), UserRole::Ngo);
        assert!("courier".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_only_admin_is_not_registrable() {
        assert!(UserRole::Donor.is_registrable());
        assert!(UserRole::Ngo.is_registrable());
        assert!(UserRole::Volunteer.is_registrable());
        assert!(!UserRole::Admin.is_registrable());
    }
}

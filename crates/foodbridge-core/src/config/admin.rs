//! Platform administrator configuration.
//!
//! The administrator is not a row in the user store. Login checks these
//! credentials before consulting the database, and a match issues a token
//! with the reserved nil-UUID subject.

use serde::{Deserialize, Serialize};

/// Fixed out-of-band administrator credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Administrator login name.
    #[serde(default = "default_username")]
    pub username: String,
    /// Administrator password (override in deployment config or env).
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

//! Fixed out-of-band administrator credential.
//!
//! The platform administrator is not a row in the user store. Login checks
//! this credential before any database lookup, and a matching login is
//! issued a token whose subject is the reserved nil UUID.

use uuid::Uuid;

use foodbridge_core::config::admin::AdminConfig;

/// Reserved subject ID for administrator tokens.
pub const ADMIN_USER_ID: Uuid = Uuid::nil();

/// Holds the configured administrator credential pair.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    /// Build from the `[admin]` configuration section.
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// The administrator's login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a login attempt against the fixed credential.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_pair_only() {
        let creds = AdminCredentials::from_config(&AdminConfig {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        });

        assert!(creds.matches("admin", "hunter2"));
        assert!(!creds.matches("admin", "wrong"));
        assert!(!creds.matches("Admin", "hunter2"));
    }

    #[test]
    fn test_admin_subject_is_nil_uuid() {
        assert!(ADMIN_USER_ID.is_nil());
    }
}

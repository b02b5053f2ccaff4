//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token validity window in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl_days() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_section() {
        let cfg: AuthConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.token_ttl_days, 7);
        assert_eq!(cfg.password_min_length, 8);
        assert_eq!(cfg.jwt_secret, "CHANGE_ME_IN_PRODUCTION");
    }
}

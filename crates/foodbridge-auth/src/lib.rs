//! # foodbridge-auth
//!
//! Authentication primitives for the FoodBridge platform.
//!
//! ## Modules
//!
//! - `jwt` — self-contained JWT creation and validation (HS256)
//! - `password` — Argon2id password hashing
//! - `admin` — the fixed out-of-band platform administrator credential

pub mod admin;
pub mod jwt;
pub mod password;

pub use admin::AdminCredentials;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;

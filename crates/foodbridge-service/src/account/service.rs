//! Registration, login, and profile management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use foodbridge_auth::admin::{ADMIN_USER_ID, AdminCredentials};
use foodbridge_auth::jwt::JwtEncoder;
use foodbridge_auth::password::PasswordHasher;
use foodbridge_core::error::AppError;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::user::model::{CreateUser, DeliveryLocation};
use foodbridge_entity::user::{ApprovalStatus, User, UserRole};

use crate::context::RequestContext;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAccount {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Requested role.
    pub role: UserRole,
}

/// Public view of an account, safe to return to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Account ID (nil UUID for the administrator).
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Vetting status.
    pub approval_status: ApprovalStatus,
    /// NGO drop-off latitude.
    pub delivery_lat: Option<f64>,
    /// NGO drop-off longitude.
    pub delivery_lng: Option<f64>,
    /// NGO drop-off street address.
    pub delivery_address: Option<String>,
}

impl AccountProfile {
    /// Build a profile from a stored account row.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            approval_status: user.approval_status,
            delivery_lat: user.delivery_lat,
            delivery_lng: user.delivery_lng,
            delivery_address: user.delivery_address.clone(),
        }
    }

    /// Synthetic profile for the out-of-band administrator.
    pub fn admin(username: &str) -> Self {
        Self {
            id: ADMIN_USER_ID,
            username: username.to_string(),
            email: None,
            display_name: Some("Platform Administrator".to_string()),
            role: UserRole::Admin,
            approval_status: ApprovalStatus::Approved,
            delivery_lat: None,
            delivery_lng: None,
            delivery_address: None,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub user: AccountProfile,
}

/// Handles registration, login, and profile operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Fixed administrator credential.
    admin: AdminCredentials,
    /// Minimum password length at registration.
    password_min_length: usize,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        admin: AdminCredentials,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            admin,
            password_min_length,
        }
    }

    /// Registers a new account.
    ///
    /// NGO accounts start `pending` and must be approved by the admin
    /// before they can claim; donors and volunteers are approved at once.
    pub async fn register(&self, req: RegisterAccount) -> Result<AccountProfile, AppError> {
        let username = req.username.trim();
        if username.len() < 3 || username.len() > 50 {
            return Err(AppError::validation(
                "Username must be between 3 and 50 characters",
            ));
        }
        if !req.role.is_registrable() {
            return Err(AppError::validation("The admin role cannot be registered"));
        }
        if req.password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        if let Some(ref email) = req.email {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email address"));
            }
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let approval_status = match req.role {
            UserRole::Ngo => ApprovalStatus::Pending,
            _ => ApprovalStatus::Approved,
        };

        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: req.email,
                password_hash,
                display_name: req.display_name,
                role: req.role,
                approval_status,
            })
            .await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "Account registered"
        );

        Ok(AccountProfile::from_user(&user))
    }

    /// Authenticates a username/password pair and issues a token.
    ///
    /// The fixed administrator credential is checked before the user store;
    /// the admin never hits the database.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if self.admin.matches(username, password) {
            let (token, expires_at) =
                self.encoder
                    .generate_token(ADMIN_USER_ID, UserRole::Admin, username)?;
            info!(username = %username, "Administrator logged in");
            return Ok(LoginOutcome {
                token,
                expires_at,
                user: AccountProfile::admin(username),
            });
        }

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Invalid username or password"))?;

        if !self
            .hasher
            .verify_password(password, &user.password_hash)?
        {
            return Err(AppError::unauthenticated("Invalid username or password"));
        }

        let (token, expires_at) =
            self.encoder
                .generate_token(user.id, user.role, &user.username)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome {
            token,
            expires_at,
            user: AccountProfile::from_user(&user),
        })
    }

    /// Returns the caller's profile.
    pub async fn me(&self, ctx: &RequestContext) -> Result<AccountProfile, AppError> {
        if ctx.is_admin() {
            return Ok(AccountProfile::admin(&ctx.username));
        }

        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        Ok(AccountProfile::from_user(&user))
    }

    /// Sets the NGO caller's drop-off location.
    pub async fn update_delivery_location(
        &self,
        ctx: &RequestContext,
        location: DeliveryLocation,
    ) -> Result<AccountProfile, AppError> {
        if ctx.role != UserRole::Ngo {
            return Err(AppError::forbidden(
                "Only NGO accounts have a delivery location",
            ));
        }
        if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lng) {
            return Err(AppError::validation("Coordinates are out of range"));
        }
        if location.address.trim().is_empty() {
            return Err(AppError::validation("Address must not be empty"));
        }

        let user = self
            .user_repo
            .update_delivery_location(ctx.user_id, &location)
            .await?;

        Ok(AccountProfile::from_user(&user))
    }
}

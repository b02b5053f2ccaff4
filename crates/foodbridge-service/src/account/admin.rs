//! Admin decisions on NGO registrations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::notification::NotificationSeverity;
use foodbridge_entity::user::{ApprovalStatus, User, UserRole};

use crate::account::service::AccountProfile;
use crate::notification::NotificationService;

/// Handles the NGO vetting queue.
#[derive(Debug, Clone)]
pub struct AdminAccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Notification service for decision notices.
    notifications: Arc<NotificationService>,
}

impl AdminAccountService {
    /// Creates a new admin account service.
    pub fn new(user_repo: Arc<UserRepository>, notifications: Arc<NotificationService>) -> Self {
        Self {
            user_repo,
            notifications,
        }
    }

    /// Lists NGO accounts still awaiting a decision.
    pub async fn list_pending_ngos(&self) -> Result<Vec<AccountProfile>, AppError> {
        let users = self
            .user_repo
            .find_by_role_and_approval(UserRole::Ngo, ApprovalStatus::Pending)
            .await?;
        Ok(users.iter().map(AccountProfile::from_user).collect())
    }

    /// Approves a pending NGO registration.
    pub async fn approve_ngo(&self, ngo_id: Uuid) -> Result<AccountProfile, AppError> {
        let user = self.decide(ngo_id, ApprovalStatus::Approved).await?;

        self.notifications.notify_detached(
            user.id,
            "Registration approved".to_string(),
            "Your organisation has been approved. You can now claim donations.".to_string(),
            NotificationSeverity::Success,
        );

        info!(ngo_id = %user.id, "NGO registration approved");
        Ok(AccountProfile::from_user(&user))
    }

    /// Rejects a pending NGO registration.
    pub async fn reject_ngo(
        &self,
        ngo_id: Uuid,
        reason: Option<String>,
    ) -> Result<AccountProfile, AppError> {
        let user = self.decide(ngo_id, ApprovalStatus::Rejected).await?;

        let message = reason
            .unwrap_or_else(|| "Your organisation's registration was not approved.".to_string());
        self.notifications.notify_detached(
            user.id,
            "Registration rejected".to_string(),
            message,
            NotificationSeverity::Warning,
        );

        info!(ngo_id = %user.id, "NGO registration rejected");
        Ok(AccountProfile::from_user(&user))
    }

    /// Shared precondition checks and the guarded status flip.
    async fn decide(&self, ngo_id: Uuid, to: ApprovalStatus) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_id(ngo_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        if user.role != UserRole::Ngo {
            return Err(AppError::validation("Account is not an NGO"));
        }
        if !user.approval_status.is_decidable() {
            return Err(AppError::invalid_state(format!(
                "Registration was already decided: '{}'",
                user.approval_status
            )));
        }

        self.user_repo
            .update_approval(ngo_id, ApprovalStatus::Pending, to)
            .await?
            .ok_or_else(|| AppError::invalid_state("Registration was already decided"))
    }
}

//! In-app notification store access and best-effort dispatch.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_entity::notification::{CreateNotification, Notification, NotificationSeverity};

use crate::context::RequestContext;

/// Manages the append-only notification store.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Records a notification for a user.
    pub async fn notify(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        severity: NotificationSeverity,
    ) -> Result<Notification, AppError> {
        self.notif_repo
            .create(&CreateNotification {
                user_id,
                title: title.to_string(),
                message: message.to_string(),
                severity,
            })
            .await
    }

    /// Records a notification on a background task, never failing the caller.
    ///
    /// Workflow operations call this after their transaction commits; a
    /// failed write is logged at warn and otherwise dropped.
    pub fn notify_detached(
        self: &Arc<Self>,
        user_id: Uuid,
        title: String,
        message: String,
        severity: NotificationSeverity,
    ) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = service
                .notify(user_id, &title, &message, severity)
                .await
            {
                warn!(
                    user_id = %user_id,
                    title = %title,
                    error = %e,
                    "Failed to record notification"
                );
            }
        });
    }

    /// Lists notifications for the current user.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notif_repo.find_by_user(ctx.user_id, &page).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks a notification as read; only the owner's rows match.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        let updated = self.notif_repo.mark_read(notification_id, ctx.user_id).await?;
        if !updated {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.mark_all_read(ctx.user_id).await
    }
}

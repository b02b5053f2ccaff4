//! In-app notification endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::notification::Notification;

use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// `GET /api/notifications`
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, ApiError> {
    let page = state
        .notification_service
        .list_notifications(user.context(), pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// `GET /api/notifications/unread-count`
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(user.context()).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// `PUT /api/notifications/{id}/read`
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .notification_service
        .mark_read(user.context(), notification_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Notification marked as read",
    ))))
}

/// `PUT /api/notifications/read-all`
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state
        .notification_service
        .mark_all_read(user.context())
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

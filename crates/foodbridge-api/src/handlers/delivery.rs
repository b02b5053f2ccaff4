//! Volunteer delivery operations.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use foodbridge_entity::delivery::{Delivery, DeliveryDetail, DeliveryStatus};

use crate::dto::request::UpdateDeliveryStatusRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// `GET /api/deliveries/mine` — the volunteer's assigned deliveries.
pub async fn list_my_deliveries(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<Delivery>>>, ApiError> {
    rbac::require_volunteer(user.context())?;
    let deliveries = state
        .workflow_service
        .list_my_deliveries(user.context())
        .await?;
    Ok(Json(ApiResponse::ok(deliveries)))
}

/// `GET /api/deliveries/{id}` — pickup and drop-off details.
pub async fn get_delivery(
    State(state): State<AppState>,
    user: AuthUser,
    Path(delivery_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeliveryDetail>>, ApiError> {
    let detail = state
        .workflow_service
        .get_delivery_detail(user.context(), delivery_id)
        .await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// `PUT /api/deliveries/{id}/status` — advance the delivery one step.
pub async fn update_delivery_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(delivery_id): Path<Uuid>,
    Json(req): Json<UpdateDeliveryStatusRequest>,
) -> Result<Json<ApiResponse<Delivery>>, ApiError> {
    rbac::require_volunteer(user.context())?;

    let target = DeliveryStatus::from_str(&req.status)?;
    let delivery = state
        .workflow_service
        .advance_delivery(user.context(), delivery_id, target)
        .await?;

    Ok(Json(ApiResponse::ok(delivery)))
}

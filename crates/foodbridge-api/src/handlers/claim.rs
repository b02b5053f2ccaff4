//! NGO claim operations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use foodbridge_entity::claim::{Claim, ClaimDetail};
use foodbridge_service::workflow::service::CompletedDelivery;

use crate::dto::request::CreateClaimRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// `POST /api/claims` — NGO claims a donation.
pub async fn submit_claim(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Claim>>), ApiError> {
    rbac::require_ngo(user.context())?;

    let claim = state
        .workflow_service
        .submit_claim(user.context(), req.donation_id, req.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(claim))))
}

/// `GET /api/claims/mine` — NGO's claims with donation details.
pub async fn list_my_claims(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<ClaimDetail>>>, ApiError> {
    rbac::require_ngo(user.context())?;
    let claims = state.workflow_service.list_my_claims(user.context()).await?;
    Ok(Json(ApiResponse::ok(claims)))
}

/// `POST /api/claims/{id}/confirm` — NGO confirms receipt of the delivery.
pub async fn confirm_delivery(
    State(state): State<AppState>,
    user: AuthUser,
    Path(claim_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CompletedDelivery>>, ApiError> {
    rbac::require_ngo(user.context())?;

    let completed = state
        .workflow_service
        .confirm_delivery(user.context(), claim_id)
        .await?;

    Ok(Json(ApiResponse::ok(completed)))
}

//! Admin endpoints: NGO vetting, the claim queue, volunteer assignment,
//! and the donation overview.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::claim::{ClaimDetail, ClaimStatus};
use foodbridge_entity::delivery::Delivery;
use foodbridge_entity::donation::Donation;
use foodbridge_service::account::service::AccountProfile;
use foodbridge_service::workflow::service::ClaimDecision;

use crate::dto::request::{AdminClaimsQuery, AssignVolunteerRequest, RejectRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac;
use crate::state::AppState;

// ── NGO vetting ──────────────────────────────────────────────────────

/// `GET /api/admin/ngos/pending`
pub async fn list_pending_ngos(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<AccountProfile>>>, ApiError> {
    rbac::require_admin(user.context())?;
    let ngos = state.admin_account_service.list_pending_ngos().await?;
    Ok(Json(ApiResponse::ok(ngos)))
}

/// `PUT /api/admin/ngos/{id}/approve`
pub async fn approve_ngo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ngo_id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    rbac::require_admin(user.context())?;
    let profile = state.admin_account_service.approve_ngo(ngo_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// `PUT /api/admin/ngos/{id}/reject`
pub async fn reject_ngo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ngo_id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    rbac::require_admin(user.context())?;
    let profile = state
        .admin_account_service
        .reject_ngo(ngo_id, req.reason)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

// ── Claim queue ──────────────────────────────────────────────────────

/// `GET /api/admin/claims`
pub async fn list_claims(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminClaimsQuery>,
) -> Result<Json<ApiResponse<PageResponse<ClaimDetail>>>, ApiError> {
    rbac::require_admin(user.context())?;

    let status = match query.status.as_deref() {
        Some(s) => Some(ClaimStatus::from_str(s)?),
        None => None,
    };
    let page = PageRequest::new(query.page.unwrap_or(1), query.per_page.unwrap_or(25));

    let claims = state.workflow_service.list_claims(status, page).await?;
    Ok(Json(ApiResponse::ok(claims)))
}

/// `PUT /api/admin/claims/{id}/approve`
pub async fn approve_claim(
    State(state): State<AppState>,
    user: AuthUser,
    Path(claim_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClaimDecision>>, ApiError> {
    rbac::require_admin(user.context())?;
    let decision = state.workflow_service.approve_claim(claim_id).await?;
    Ok(Json(ApiResponse::ok(decision)))
}

/// `PUT /api/admin/claims/{id}/reject`
pub async fn reject_claim(
    State(state): State<AppState>,
    user: AuthUser,
    Path(claim_id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<ApiResponse<ClaimDecision>>, ApiError> {
    rbac::require_admin(user.context())?;
    let decision = state
        .workflow_service
        .reject_claim(claim_id, req.reason)
        .await?;
    Ok(Json(ApiResponse::ok(decision)))
}

/// `POST /api/admin/claims/{id}/assign`
pub async fn assign_volunteer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(claim_id): Path<Uuid>,
    Json(req): Json<AssignVolunteerRequest>,
) -> Result<Json<ApiResponse<Delivery>>, ApiError> {
    rbac::require_admin(user.context())?;
    let delivery = state
        .workflow_service
        .assign_volunteer(claim_id, req.volunteer_id)
        .await?;
    Ok(Json(ApiResponse::ok(delivery)))
}

// ── Donation overview ────────────────────────────────────────────────

/// `GET /api/admin/donations`
pub async fn list_donations(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Donation>>>, ApiError> {
    rbac::require_admin(user.context())?;
    let donations = state
        .donation_service
        .list_all(pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(donations)))
}

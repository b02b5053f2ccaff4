//! Donation posting and listing.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use foodbridge_entity::donation::Donation;
use foodbridge_service::donation::service::PostDonation;

use crate::dto::request::CreateDonationRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// `POST /api/donations` — donor posts a new donation.
pub async fn create_donation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateDonationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Donation>>), ApiError> {
    rbac::require_donor(user.context())?;

    let donation = state
        .donation_service
        .create_donation(
            user.context(),
            PostDonation {
                title: req.title,
                description: req.description,
                quantity: req.quantity,
                unit: req.unit,
                prepared_time: req.prepared_time,
                expiry_time: req.expiry_time,
                pickup_lat: req.pickup_lat,
                pickup_lng: req.pickup_lng,
                pickup_address: req.pickup_address,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(donation))))
}

/// `GET /api/donations/mine` — donor's own donations.
pub async fn list_my_donations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<Donation>>>, ApiError> {
    rbac::require_donor(user.context())?;
    let donations = state.donation_service.list_my_donations(user.context()).await?;
    Ok(Json(ApiResponse::ok(donations)))
}

/// `GET /api/donations/available` — donations NGOs can still claim.
pub async fn list_available_donations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<Donation>>>, ApiError> {
    rbac::require_ngo(user.context())?;
    let donations = state.donation_service.list_requestable().await?;
    Ok(Json(ApiResponse::ok(donations)))
}

/// `GET /api/donations/{id}` — owner or admin view of one donation.
pub async fn get_donation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(donation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Donation>>, ApiError> {
    let donation = state
        .donation_service
        .get_donation(user.context(), donation_id)
        .await?;
    Ok(Json(ApiResponse::ok(donation)))
}

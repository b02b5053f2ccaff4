//! Account profile updates.

use axum::Json;
use axum::extract::State;

use foodbridge_entity::user::model::DeliveryLocation;
use foodbridge_service::account::service::AccountProfile;

use crate::dto::request::UpdateLocationRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `PUT /api/users/me/location` — NGO drop-off location.
pub async fn update_location(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    let profile = state
        .account_service
        .update_delivery_location(
            user.context(),
            DeliveryLocation {
                lat: req.lat,
                lng: req.lng,
                address: req.address,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(profile)))
}

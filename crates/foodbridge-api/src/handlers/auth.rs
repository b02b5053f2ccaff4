//! Registration, login, and the current-user profile.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use foodbridge_entity::user::UserRole;
use foodbridge_service::account::service::{AccountProfile, LoginOutcome, RegisterAccount};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountProfile>>), ApiError> {
    let role = UserRole::from_str(&req.role)?;

    let profile = state
        .account_service
        .register(RegisterAccount {
            username: req.username,
            email: req.email,
            password: req.password,
            display_name: req.display_name,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(profile))))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginOutcome>>, ApiError> {
    let outcome = state
        .account_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(outcome)))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    let profile = state.account_service.me(user.context()).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

//! Route table and tower layer assembly.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::middleware as axum_middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use foodbridge_core::config::app::CorsConfig;

use crate::handlers;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    let api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(donation_routes())
        .merge(claim_routes())
        .merge(delivery_routes())
        .merge(notification_routes())
        .merge(admin_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me/location", put(handlers::user::update_location))
}

fn donation_routes() -> Router<AppState> {
    Router::new()
        .route("/donations", post(handlers::donation::create_donation))
        .route("/donations/mine", get(handlers::donation::list_my_donations))
        .route(
            "/donations/available",
            get(handlers::donation::list_available_donations),
        )
        .route("/donations/{id}", get(handlers::donation::get_donation))
}

fn claim_routes() -> Router<AppState> {
    Router::new()
        .route("/claims", post(handlers::claim::submit_claim))
        .route("/claims/mine", get(handlers::claim::list_my_claims))
        .route("/claims/{id}/confirm", post(handlers::claim::confirm_delivery))
}

fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/deliveries/mine", get(handlers::delivery::list_my_deliveries))
        .route("/deliveries/{id}", get(handlers::delivery::get_delivery))
        .route(
            "/deliveries/{id}/status",
            put(handlers::delivery::update_delivery_status),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/ngos/pending", get(handlers::admin::list_pending_ngos))
        .route("/admin/ngos/{id}/approve", put(handlers::admin::approve_ngo))
        .route("/admin/ngos/{id}/reject", put(handlers::admin::reject_ngo))
        .route("/admin/claims", get(handlers::admin::list_claims))
        .route("/admin/claims/{id}/approve", put(handlers::admin::approve_claim))
        .route("/admin/claims/{id}/reject", put(handlers::admin::reject_claim))
        .route("/admin/claims/{id}/assign", post(handlers::admin::assign_volunteer))
        .route("/admin/donations", get(handlers::admin::list_donations))
}

/// Builds the CORS layer from configuration.
///
/// Unparseable origins or methods are skipped with a warning rather than
/// failing startup.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new().max_age(Duration::from_secs(config.max_age_seconds));

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Skipping unparseable CORS origin");
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| match m.parse::<Method>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(method = %m, "Skipping unparseable CORS method");
                None
            }
        })
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<axum::http::HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use foodbridge_auth::jwt::decoder::JwtDecoder;
use foodbridge_auth::jwt::encoder::JwtEncoder;
use foodbridge_core::config::AppConfig;
use foodbridge_service::account::admin::AdminAccountService;
use foodbridge_service::account::service::AccountService;
use foodbridge_service::donation::service::DonationService;
use foodbridge_service::notification::service::NotificationService;
use foodbridge_service::workflow::service::WorkflowService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, profiles
    pub account_service: Arc<AccountService>,
    /// NGO vetting queue
    pub admin_account_service: Arc<AdminAccountService>,
    /// Donation posting and views
    pub donation_service: Arc<DonationService>,
    /// The donation workflow engine
    pub workflow_service: Arc<WorkflowService>,
    /// In-app notifications
    pub notification_service: Arc<NotificationService>,
}

//! FoodBridge server — surplus food donation coordination platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use foodbridge_api::state::AppState;
use foodbridge_auth::admin::AdminCredentials;
use foodbridge_auth::jwt::{JwtDecoder, JwtEncoder};
use foodbridge_auth::password::PasswordHasher;
use foodbridge_core::config::AppConfig;
use foodbridge_core::error::AppError;
use foodbridge_database::connection::DatabasePool;
use foodbridge_database::repositories::claim::ClaimRepository;
use foodbridge_database::repositories::delivery::DeliveryRepository;
use foodbridge_database::repositories::donation::DonationRepository;
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_database::repositories::workflow::WorkflowRepository;
use foodbridge_service::account::admin::AdminAccountService;
use foodbridge_service::account::service::AccountService;
use foodbridge_service::donation::service::DonationService;
use foodbridge_service::notification::service::NotificationService;
use foodbridge_service::workflow::service::WorkflowService;

#[tokio::main]
async fn main() {
    let env = std::env::var("FOODBRIDGE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FoodBridge v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    db.run_migrations().await?;
    let db_pool = db.into_pool();

    // ── Step 2: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let donation_repo = Arc::new(DonationRepository::new(db_pool.clone()));
    let claim_repo = Arc::new(ClaimRepository::new(db_pool.clone()));
    let delivery_repo = Arc::new(DeliveryRepository::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));
    let workflow_repo = Arc::new(WorkflowRepository::new(db_pool.clone()));

    // ── Step 3: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let admin_credentials = AdminCredentials::from_config(&config.admin);

    // ── Step 4: Initialize services ──────────────────────────────
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notification_repo)));
    let account_service = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        admin_credentials,
        config.auth.password_min_length,
    ));
    let admin_account_service = Arc::new(AdminAccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&notification_service),
    ));
    let donation_service = Arc::new(DonationService::new(Arc::clone(&donation_repo)));
    let workflow_service = Arc::new(WorkflowService::new(
        Arc::clone(&claim_repo),
        Arc::clone(&delivery_repo),
        Arc::clone(&donation_repo),
        Arc::clone(&user_repo),
        Arc::clone(&workflow_repo),
        Arc::clone(&notification_service),
    ));

    tracing::info!("Services initialized");

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_encoder,
        jwt_decoder,
        account_service,
        admin_account_service,
        donation_service,
        workflow_service,
        notification_service,
    };

    let app = foodbridge_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("FoodBridge server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    tracing::info!("FoodBridge server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

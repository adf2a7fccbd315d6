//! Accounthub server — account management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use accounthub_core::config::AppConfig;
use accounthub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
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

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ACCOUNTHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Accounthub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = accounthub_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    tracing::info!("Running database migrations...");
    accounthub_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = accounthub_cache::provider::CacheManager::new(&config.cache).await?;
    let cache = Arc::new(cache);

    // ── Step 3: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(accounthub_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let reset_repo = Arc::new(
        accounthub_database::repositories::reset_token::ResetTokenRepository::new(db_pool.clone()),
    );

    // ── Step 4: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(accounthub_auth::password::hasher::PasswordHasher::new());
    let password_validator = Arc::new(
        accounthub_auth::password::validator::PasswordValidator::new(&config.auth),
    );
    let jwt_encoder = Arc::new(accounthub_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(accounthub_auth::jwt::decoder::JwtDecoder::new(&config.auth));
    let gateway = Arc::new(accounthub_auth::gateway::Gateway::new());

    let reset_manager = Arc::new(accounthub_auth::reset::manager::ResetTokenManager::new(
        Arc::clone(&reset_repo) as Arc<dyn accounthub_auth::reset::ResetTokenStore>,
        &config.auth,
    ));

    // ── Step 5: Initialize services ──────────────────────────────
    let account_service = Arc::new(accounthub_service::account::service::AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
    ));
    let reset_service = Arc::new(accounthub_service::account::reset::ResetService::new(
        Arc::clone(&reset_manager),
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::new(accounthub_service::account::reset::LogMailer),
    ));
    let stats_service = Arc::new(accounthub_service::stats::service::StatsService::new(
        Arc::clone(&user_repo) as Arc<dyn accounthub_service::stats::UserCounts>,
        Arc::clone(&cache),
    ));

    // Reclaim storage from tokens that expired while the server was down.
    let swept = reset_service.sweep_expired_tokens().await?;
    if swept > 0 {
        tracing::info!(swept, "Removed expired reset tokens");
    }

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = accounthub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        cache,
        gateway,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        reset_repo,
        account_service,
        reset_service,
        stats_service,
    };

    let app = accounthub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Accounthub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Accounthub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

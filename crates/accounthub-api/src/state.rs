//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use accounthub_auth::gateway::Gateway;
use accounthub_auth::jwt::decoder::JwtDecoder;
use accounthub_auth::jwt::encoder::JwtEncoder;
use accounthub_auth::password::hasher::PasswordHasher;
use accounthub_cache::provider::CacheManager;
use accounthub_core::config::AppConfig;
use accounthub_database::repositories::reset_token::ResetTokenRepository;
use accounthub_database::repositories::user::UserRepository;
use accounthub_service::account::reset::ResetService;
use accounthub_service::account::service::AccountService;
use accounthub_service::stats::service::StatsService;

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
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Authorization gateway
    pub gateway: Arc<Gateway>,
    /// Session token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Session token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Reset token repository
    pub reset_repo: Arc<ResetTokenRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Account service
    pub account_service: Arc<AccountService>,
    /// Password reset service
    pub reset_service: Arc<ResetService>,
    /// Stats aggregation service
    pub stats_service: Arc<StatsService>,
}

/// The slice of state the page gateway middleware needs.
///
/// Kept separate from [`AppState`] so the gateway (and its tests) can run
/// without a database pool or cache.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// Authorization gateway
    pub gateway: Arc<Gateway>,
    /// Session token decoder (the identity-provider adapter)
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Name of the session cookie
    pub session_cookie: String,
}

impl GatewayState {
    /// Creates gateway state from its parts.
    pub fn new(gateway: Arc<Gateway>, jwt_decoder: Arc<JwtDecoder>, session_cookie: String) -> Self {
        Self {
            gateway,
            jwt_decoder,
            session_cookie,
        }
    }

    /// Extracts the gateway slice from the full application state.
    pub fn from_app(state: &AppState) -> Self {
        Self {
            gateway: Arc::clone(&state.gateway),
            jwt_decoder: Arc::clone(&state.jwt_decoder),
            session_cookie: state.config.auth.session_cookie.clone(),
        }
    }
}

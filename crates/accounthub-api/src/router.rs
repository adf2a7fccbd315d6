//! Route definitions for the Accounthub HTTP surface.
//!
//! Page routes sit behind the authorization gateway middleware; API routes
//! authenticate through the `AuthUser` extractor and are mounted under
//! `/api`, which the gateway does not govern (mirroring the matcher of the
//! page middleware).

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::{AppState, GatewayState};

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let gateway_state = GatewayState::from_app(&state);

    let api = api_routes().with_state(state);

    Router::new()
        .merge(page_router(gateway_state))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
}

/// Page routes, all behind the gateway middleware.
///
/// Public separately from [`build_router`] so gateway behavior can be
/// exercised end-to-end without a database.
pub fn page_router(gateway: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::landing))
        .route("/login", get(handlers::pages::login))
        .route("/register", get(handlers::pages::register))
        .route("/reset-password", get(handlers::pages::reset_password))
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/profile", get(handlers::pages::profile))
        .route("/admin/dashboard", get(handlers::pages::admin_dashboard))
        .route("/admin/profile", get(handlers::pages::admin_profile))
        .layer(axum_middleware::from_fn_with_state(
            gateway,
            middleware::gateway::page_gateway,
        ))
}

/// API routes under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/auth/reset-password/request",
            post(handlers::auth::reset_request),
        )
        .route(
            "/api/auth/reset-password/confirm",
            post(handlers::auth::reset_confirm),
        )
        // User self-service
        .route("/api/user/profile", get(handlers::user::get_profile))
        .route("/api/user/profile", put(handlers::user::update_profile))
        .route(
            "/api/user/change-password",
            put(handlers::user::change_password),
        )
        // Admin
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route(
            "/api/admin/stats/cache",
            delete(handlers::admin::invalidate_stats),
        )
        // Health
        .route("/api/health", get(handlers::health::health_check))
}

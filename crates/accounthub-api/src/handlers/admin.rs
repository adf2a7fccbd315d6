//! Admin dashboard handlers.

use axum::Json;
use axum::extract::State;

use accounthub_core::error::AppError;
use accounthub_entity::stats::UserStats;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserStats>>, AppError> {
    require_admin(&auth)?;

    let stats = state.stats_service.get_stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// DELETE /api/admin/stats/cache
pub async fn invalidate_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&auth)?;

    state.stats_service.invalidate().await;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Stats cache invalidated",
    ))))
}

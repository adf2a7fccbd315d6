//! Auth handlers — register, login, logout, password reset.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use accounthub_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest, ResetConfirmRequest, ResetRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::state::AppState;

/// The uniform reply for reset requests, sent whether or not the account
/// exists.
const RESET_REQUESTED_MESSAGE: &str =
    "If an account with this email exists, password reset instructions have been sent";

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .account_service
        .register(req.name, &req.email, &req.password)
        .await?;

    // The new account changes the dashboard counts immediately.
    state.stats_service.invalidate().await;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .account_service
        .verify_credentials(&req.email, &req.password)
        .await?;

    let (token, _expires_at) =
        state
            .jwt_encoder
            .generate_session_token(user.id, user.role, &user.email)?;

    let cookie = Cookie::build((state.config.auth.session_cookie.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(ApiResponse::ok(user.into()))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let mut cookie = Cookie::from(state.config.auth.session_cookie.clone());
    cookie.set_path("/");

    (
        jar.remove(cookie),
        Json(ApiResponse::ok(MessageResponse::new("Logged out"))),
    )
}

/// POST /api/auth/reset-password/request
pub async fn reset_request(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.reset_service.request_reset(&req.email).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        RESET_REQUESTED_MESSAGE,
    ))))
}

/// POST /api/auth/reset-password/confirm
pub async fn reset_confirm(
    State(state): State<AppState>,
    Json(req): Json<ResetConfirmRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .reset_service
        .confirm_reset(&req.email, &req.token, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password reset successful",
    ))))
}

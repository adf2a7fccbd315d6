//! `AuthUser` extractor — pulls the session cookie, validates it, and
//! injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use accounthub_core::error::AppError;
use accounthub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in API handlers.
///
/// Missing, malformed, and expired session cookies all reject with the
/// same 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.auth.session_cookie)
            .map(|c| c.value())
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        let claims = state
            .jwt_decoder
            .decode_session_token(token)
            .map_err(|_| AppError::unauthorized("Unauthorized"))?;

        let ctx = RequestContext::new(claims.user_id(), claims.role, claims.email);

        Ok(AuthUser(ctx))
    }
}

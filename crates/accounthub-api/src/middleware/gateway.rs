//! Page authorization gateway middleware.
//!
//! Runs before every page handler: resolves the session cookie into a
//! session fact, asks the gateway for a decision, and either forwards the
//! request, redirects, or terminates it. API routes are not mounted behind
//! this layer; they authenticate through the `AuthUser` extractor and
//! surface `401` directly.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use accounthub_auth::gateway::Decision;
use accounthub_auth::session::SessionFact;

use crate::state::GatewayState;

/// Applies the gateway decision to one inbound page request.
pub async fn page_gateway(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Response {
    let session = resolve_session(&state, &request);
    let path = request.uri().path().to_string();

    match state.gateway.decide(&path, &session) {
        Decision::Allow => next.run(request).await,
        Decision::RedirectTo(target) => {
            debug!(path, target, "Gateway redirect");
            Redirect::to(&target).into_response()
        }
        Decision::Reject(status) => StatusCode::from_u16(status)
            .unwrap_or(StatusCode::UNAUTHORIZED)
            .into_response(),
    }
}

/// Resolves the request's session cookie into a session fact.
///
/// Missing, malformed, and expired cookies all resolve to the anonymous
/// fact; the gateway never sees the difference.
fn resolve_session(state: &GatewayState, request: &Request) -> SessionFact {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar.get(&state.session_cookie).map(|c| c.value());
    state.jwt_decoder.resolve_session(token)
}

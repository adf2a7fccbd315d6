//! Minimal page handlers for the gateway-governed surface.
//!
//! The application's real UI is rendered client-side; these handlers serve
//! placeholder shells. What matters is that every one of them sits behind
//! the gateway middleware, which has already decided the request may
//! proceed by the time a handler runs.

use axum::response::Html;

/// GET /
pub async fn landing() -> Html<&'static str> {
    Html("<h1>Accounthub</h1><p><a href=\"/login\">Sign in</a> or <a href=\"/register\">create an account</a>.</p>")
}

/// GET /login
pub async fn login() -> Html<&'static str> {
    Html("<h1>Sign in</h1>")
}

/// GET /register
pub async fn register() -> Html<&'static str> {
    Html("<h1>Create an account</h1>")
}

/// GET /reset-password
pub async fn reset_password() -> Html<&'static str> {
    Html("<h1>Reset your password</h1>")
}

/// GET /dashboard
pub async fn dashboard() -> Html<&'static str> {
    Html("<h1>Dashboard</h1>")
}

/// GET /profile
pub async fn profile() -> Html<&'static str> {
    Html("<h1>Profile</h1>")
}

/// GET /admin/dashboard
pub async fn admin_dashboard() -> Html<&'static str> {
    Html("<h1>Admin dashboard</h1>")
}

/// GET /admin/profile
pub async fn admin_profile() -> Html<&'static str> {
    Html("<h1>Admin profile</h1>")
}

//! End-to-end tests for the page authorization gateway middleware.
//!
//! Drives the real page router with the gateway layer mounted, a real
//! session-cookie decoder, and no database: the gateway never touches
//! storage.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use uuid::Uuid;

use accounthub_api::router::page_router;
use accounthub_api::state::GatewayState;
use accounthub_auth::gateway::Gateway;
use accounthub_auth::jwt::{JwtDecoder, JwtEncoder};
use accounthub_core::config::auth::AuthConfig;
use accounthub_entity::user::UserRole;

struct TestApp {
    router: Router,
    encoder: JwtEncoder,
    cookie_name: String,
}

impl TestApp {
    fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "gateway-test-secret".into(),
            ..AuthConfig::default()
        };

        let state = GatewayState::new(
            Arc::new(Gateway::new()),
            Arc::new(JwtDecoder::new(&config)),
            config.session_cookie.clone(),
        );

        Self {
            router: page_router(state),
            encoder: JwtEncoder::new(&config),
            cookie_name: config.session_cookie,
        }
    }

    fn session_cookie(&self, role: UserRole) -> String {
        let (token, _) = self
            .encoder
            .generate_session_token(Uuid::new_v4(), role, "t@example.com")
            .expect("token generation");
        format!("{}={}", self.cookie_name, token)
    }

    async fn get(&self, path: &str, cookie: Option<&str>) -> (StatusCode, Option<String>) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).expect("request"))
            .await
            .expect("response");

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        (response.status(), location)
    }
}

#[tokio::test]
async fn test_anonymous_can_see_landing_and_auth_pages() {
    let app = TestApp::new();

    for path in ["/", "/login", "/register", "/reset-password"] {
        let (status, _) = app.get(path, None).await;
        assert_eq!(status, StatusCode::OK, "expected 200 for {path}");
    }
}

#[tokio::test]
async fn test_anonymous_protected_pages_redirect_to_login() {
    let app = TestApp::new();

    for path in ["/dashboard", "/profile", "/admin/dashboard", "/admin/profile"] {
        let (status, location) = app.get(path, None).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "expected redirect for {path}");
        assert_eq!(location.as_deref(), Some("/login"));
    }
}

#[tokio::test]
async fn test_authenticated_user_is_kept_off_auth_pages() {
    let app = TestApp::new();
    let cookie = app.session_cookie(UserRole::User);

    for path in ["/login", "/register", "/reset-password"] {
        let (status, location) = app.get(path, Some(&cookie)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/dashboard"));
    }
}

#[tokio::test]
async fn test_authenticated_admin_is_kept_off_auth_pages() {
    let app = TestApp::new();
    let cookie = app.session_cookie(UserRole::Admin);

    let (status, location) = app.get("/login", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_role_surfaces_are_disjoint() {
    let app = TestApp::new();
    let user_cookie = app.session_cookie(UserRole::User);
    let admin_cookie = app.session_cookie(UserRole::Admin);

    // Non-admins are silently steered off the admin surface.
    let (status, location) = app.get("/admin/dashboard", Some(&user_cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/dashboard"));

    // Admins are steered off the user surface.
    let (status, location) = app.get("/dashboard", Some(&admin_cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_each_role_reaches_its_own_surface() {
    let app = TestApp::new();
    let user_cookie = app.session_cookie(UserRole::User);
    let admin_cookie = app.session_cookie(UserRole::Admin);

    assert_eq!(
        app.get("/dashboard", Some(&user_cookie)).await.0,
        StatusCode::OK
    );
    assert_eq!(
        app.get("/profile", Some(&user_cookie)).await.0,
        StatusCode::OK
    );
    assert_eq!(
        app.get("/admin/dashboard", Some(&admin_cookie)).await.0,
        StatusCode::OK
    );
    assert_eq!(
        app.get("/admin/profile", Some(&admin_cookie)).await.0,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_root_redirects_authenticated_users_to_role_home() {
    let app = TestApp::new();

    let (status, location) = app.get("/", Some(&app.session_cookie(UserRole::User))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/dashboard"));

    let (status, location) = app
        .get("/", Some(&app.session_cookie(UserRole::Admin)))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_garbage_cookie_is_treated_as_anonymous() {
    let app = TestApp::new();
    let cookie = format!("{}=definitely-not-a-jwt", app.cookie_name);

    let (status, location) = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));

    // The landing page still renders.
    assert_eq!(app.get("/", Some(&cookie)).await.0, StatusCode::OK);
}

/// Following any redirect chain terminates at a 200 within one hop: the
/// gateway is idempotent, so a redirect target always decides to Allow.
#[tokio::test]
async fn test_redirects_never_loop() {
    let app = TestApp::new();
    let cookies = [
        None,
        Some(app.session_cookie(UserRole::User)),
        Some(app.session_cookie(UserRole::Admin)),
    ];
    let paths = [
        "/", "/login", "/register", "/reset-password", "/dashboard", "/profile",
        "/admin/dashboard", "/admin/profile",
    ];

    for cookie in &cookies {
        for path in paths {
            let (status, location) = app.get(path, cookie.as_deref()).await;
            if status == StatusCode::SEE_OTHER {
                let target = location.expect("redirect must carry a Location header");
                let (next_status, _) = app.get(&target, cookie.as_deref()).await;
                assert_eq!(
                    next_status,
                    StatusCode::OK,
                    "redirect from {path} to {target} did not settle"
                );
            }
        }
    }
}

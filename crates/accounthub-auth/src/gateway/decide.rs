//! The gateway decision function.

use serde::{Deserialize, Serialize};

use crate::session::SessionFact;

use super::policy::{RouteClass, RoutePolicy};

/// The gateway's verdict for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Let the request through to its handler.
    Allow,
    /// Redirect the client to the given path instead of serving the request.
    RedirectTo(String),
    /// Terminate the request with the given HTTP status. Produced by callers
    /// that terminate instead of redirecting (API-style requests); the page
    /// decision algorithm itself never yields it.
    Reject(u16),
}

impl Decision {
    /// Convenience constructor for a redirect.
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::RedirectTo(path.into())
    }

    /// Convenience constructor for a 401 rejection.
    pub fn reject_unauthorized() -> Self {
        Self::Reject(401)
    }
}

/// The request-authorization gateway.
///
/// Wraps the static route policy and exposes [`Gateway::decide`], a pure
/// function evaluated before any handler runs. Decisions are total,
/// deterministic, and idempotent: deciding again on a redirect target
/// always yields [`Decision::Allow`], so redirects can never loop.
#[derive(Debug, Clone, Default)]
pub struct Gateway {
    policy: RoutePolicy,
}

impl Gateway {
    /// Create a gateway over the default route policy.
    pub fn new() -> Self {
        Self {
            policy: RoutePolicy::new(),
        }
    }

    /// The route policy this gateway evaluates against.
    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// Decide whether a request may proceed, must be redirected, or must be
    /// rejected.
    ///
    /// Rules are evaluated in a fixed order because they overlap:
    ///
    /// 1. Unauthenticated requests to anything but public routes or the
    ///    root are sent to sign-in.
    /// 2. Authenticated requests to public auth forms are sent to the
    ///    role's home (signed-in users never see auth forms again).
    /// 3. Admin routes: signed-in non-admins are silently steered to the
    ///    user dashboard, never shown a 403.
    /// 4. User routes: admins are steered to the admin dashboard; the two
    ///    role surfaces stay disjoint.
    /// 5. The root is the public landing page when signed out and the
    ///    role's home when signed in.
    /// 6. Anything else is allowed.
    pub fn decide(&self, path: &str, session: &SessionFact) -> Decision {
        let class = self.policy.classify(path);

        if !session.authenticated
            && class != RouteClass::Public
            && class != RouteClass::Root
        {
            return Decision::redirect(self.policy.sign_in());
        }

        if session.authenticated && class == RouteClass::Public {
            return Decision::redirect(self.policy.role_home(session.role));
        }

        match class {
            RouteClass::AdminProtected if !session.role.is_admin() => {
                Decision::redirect(self.policy.user_home())
            }
            RouteClass::UserProtected if session.role.is_admin() => {
                Decision::redirect(self.policy.admin_home())
            }
            RouteClass::Root if session.authenticated => {
                Decision::redirect(self.policy.role_home(session.role))
            }
            _ => Decision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounthub_entity::user::UserRole;
    use uuid::Uuid;

    fn anon() -> SessionFact {
        SessionFact::anonymous()
    }

    fn user() -> SessionFact {
        SessionFact::authenticated(Uuid::new_v4(), UserRole::User)
    }

    fn admin() -> SessionFact {
        SessionFact::authenticated(Uuid::new_v4(), UserRole::Admin)
    }

    #[test]
    fn test_anonymous_root_is_allowed() {
        let gw = Gateway::new();
        assert_eq!(gw.decide("/", &anon()), Decision::Allow);
    }

    #[test]
    fn test_anonymous_public_is_allowed() {
        let gw = Gateway::new();
        assert_eq!(gw.decide("/login", &anon()), Decision::Allow);
        assert_eq!(gw.decide("/register", &anon()), Decision::Allow);
        assert_eq!(gw.decide("/reset-password", &anon()), Decision::Allow);
    }

    #[test]
    fn test_anonymous_protected_redirects_to_sign_in() {
        let gw = Gateway::new();
        assert_eq!(
            gw.decide("/dashboard", &anon()),
            Decision::redirect("/login")
        );
        assert_eq!(
            gw.decide("/admin/dashboard", &anon()),
            Decision::redirect("/login")
        );
        assert_eq!(gw.decide("/profile", &anon()), Decision::redirect("/login"));
        // Unclassified paths still require a session.
        assert_eq!(gw.decide("/about", &anon()), Decision::redirect("/login"));
    }

    #[test]
    fn test_authenticated_public_redirects_to_role_home() {
        let gw = Gateway::new();
        assert_eq!(
            gw.decide("/login", &user()),
            Decision::redirect("/dashboard")
        );
        assert_eq!(
            gw.decide("/login", &admin()),
            Decision::redirect("/admin/dashboard")
        );
        assert_eq!(
            gw.decide("/register", &admin()),
            Decision::redirect("/admin/dashboard")
        );
    }

    #[test]
    fn test_non_admin_steered_away_from_admin_routes() {
        let gw = Gateway::new();
        assert_eq!(
            gw.decide("/admin/dashboard", &user()),
            Decision::redirect("/dashboard")
        );
        assert_eq!(
            gw.decide("/admin/profile", &user()),
            Decision::redirect("/dashboard")
        );
    }

    #[test]
    fn test_admin_steered_away_from_user_routes() {
        let gw = Gateway::new();
        assert_eq!(
            gw.decide("/dashboard", &admin()),
            Decision::redirect("/admin/dashboard")
        );
        assert_eq!(
            gw.decide("/profile", &admin()),
            Decision::redirect("/admin/dashboard")
        );
    }

    #[test]
    fn test_own_surface_is_allowed() {
        let gw = Gateway::new();
        assert_eq!(gw.decide("/dashboard", &user()), Decision::Allow);
        assert_eq!(gw.decide("/profile", &user()), Decision::Allow);
        assert_eq!(gw.decide("/admin/dashboard", &admin()), Decision::Allow);
        assert_eq!(gw.decide("/admin/profile", &admin()), Decision::Allow);
    }

    #[test]
    fn test_authenticated_root_redirects_to_role_home() {
        let gw = Gateway::new();
        assert_eq!(gw.decide("/", &user()), Decision::redirect("/dashboard"));
        assert_eq!(
            gw.decide("/", &admin()),
            Decision::redirect("/admin/dashboard")
        );
    }

    #[test]
    fn test_unclassified_path_allowed_when_authenticated() {
        let gw = Gateway::new();
        assert_eq!(gw.decide("/about", &user()), Decision::Allow);
        assert_eq!(gw.decide("/about", &admin()), Decision::Allow);
    }

    /// Deciding again on the target of any redirect yields Allow, so the
    /// gateway can never produce a redirect loop.
    #[test]
    fn test_idempotence_redirect_targets_are_allowed() {
        let gw = Gateway::new();
        let paths = [
            "/", "/login", "/register", "/reset-password", "/dashboard", "/profile", "/admin",
            "/admin/dashboard", "/admin/profile", "/about", "/x/y/z",
        ];
        let sessions = [anon(), user(), admin()];

        for path in paths {
            for session in &sessions {
                if let Decision::RedirectTo(target) = gw.decide(path, session) {
                    assert_eq!(
                        gw.decide(&target, session),
                        Decision::Allow,
                        "redirect loop: {path} -> {target} for {session:?}"
                    );
                }
            }
        }
    }

    /// The same (path, session) pair always yields the same decision.
    #[test]
    fn test_determinism() {
        let gw = Gateway::new();
        let session = user();
        for path in ["/", "/login", "/dashboard", "/admin", "/whatever"] {
            assert_eq!(gw.decide(path, &session), gw.decide(path, &session));
        }
    }

    #[test]
    fn test_reject_maps_to_status() {
        assert_eq!(Decision::reject_unauthorized(), Decision::Reject(401));
    }
}

//! Static route policy: classification of URL path prefixes.

use serde::{Deserialize, Serialize};

use accounthub_entity::user::UserRole;

/// Access level required by a path, as classified by the route policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Auth forms: reachable only while signed out.
    Public,
    /// Admin-only surface.
    AdminProtected,
    /// Regular-user surface.
    UserProtected,
    /// The landing page, exactly `/`.
    Root,
    /// Everything else.
    Other,
}

/// Static mapping from URL path prefixes to required access levels.
///
/// The policy also owns the redirect targets: the sign-in page and the
/// per-role home routes.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    /// Prefixes reachable only while signed out.
    public_prefixes: Vec<&'static str>,
    /// Prefixes of the admin surface.
    admin_prefixes: Vec<&'static str>,
    /// Prefixes of the regular-user surface.
    user_prefixes: Vec<&'static str>,
    /// The sign-in page.
    sign_in: &'static str,
    /// Landing route for regular users after authentication.
    user_home: &'static str,
    /// Landing route for admins after authentication.
    admin_home: &'static str,
}

impl RoutePolicy {
    /// The default policy for the application's route layout.
    pub fn new() -> Self {
        Self {
            public_prefixes: vec!["/login", "/register", "/reset-password"],
            admin_prefixes: vec!["/admin"],
            user_prefixes: vec!["/dashboard", "/profile"],
            sign_in: "/login",
            user_home: "/dashboard",
            admin_home: "/admin/dashboard",
        }
    }

    /// Classify a path. Admin prefixes are checked before user prefixes so
    /// overlapping layouts resolve deterministically.
    pub fn classify(&self, path: &str) -> RouteClass {
        if path == "/" {
            return RouteClass::Root;
        }
        if self.matches_any(path, &self.public_prefixes) {
            return RouteClass::Public;
        }
        if self.matches_any(path, &self.admin_prefixes) {
            return RouteClass::AdminProtected;
        }
        if self.matches_any(path, &self.user_prefixes) {
            return RouteClass::UserProtected;
        }
        RouteClass::Other
    }

    /// The sign-in route.
    pub fn sign_in(&self) -> &'static str {
        self.sign_in
    }

    /// The regular-user home route.
    pub fn user_home(&self) -> &'static str {
        self.user_home
    }

    /// The admin home route.
    pub fn admin_home(&self) -> &'static str {
        self.admin_home
    }

    /// The landing route for the given role.
    pub fn role_home(&self, role: UserRole) -> &'static str {
        match role {
            UserRole::Admin => self.admin_home,
            UserRole::User => self.user_home,
        }
    }

    /// Prefix match on path segment boundaries: `/admin` matches `/admin`
    /// and `/admin/dashboard` but not `/administrator`.
    fn matches_any(&self, path: &str, prefixes: &[&'static str]) -> bool {
        prefixes.iter().any(|prefix| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_root() {
        let policy = RoutePolicy::new();
        assert_eq!(policy.classify("/"), RouteClass::Root);
    }

    #[test]
    fn test_classify_public() {
        let policy = RoutePolicy::new();
        assert_eq!(policy.classify("/login"), RouteClass::Public);
        assert_eq!(policy.classify("/register"), RouteClass::Public);
        assert_eq!(policy.classify("/reset-password"), RouteClass::Public);
        assert_eq!(
            policy.classify("/reset-password/confirm"),
            RouteClass::Public
        );
    }

    #[test]
    fn test_classify_protected() {
        let policy = RoutePolicy::new();
        assert_eq!(policy.classify("/admin"), RouteClass::AdminProtected);
        assert_eq!(
            policy.classify("/admin/dashboard"),
            RouteClass::AdminProtected
        );
        assert_eq!(policy.classify("/dashboard"), RouteClass::UserProtected);
        assert_eq!(policy.classify("/profile"), RouteClass::UserProtected);
    }

    #[test]
    fn test_classify_other() {
        let policy = RoutePolicy::new();
        assert_eq!(policy.classify("/about"), RouteClass::Other);
        assert_eq!(policy.classify("/administrator"), RouteClass::Other);
        assert_eq!(policy.classify("/dashboards"), RouteClass::Other);
    }

    #[test]
    fn test_role_home() {
        let policy = RoutePolicy::new();
        assert_eq!(policy.role_home(UserRole::Admin), "/admin/dashboard");
        assert_eq!(policy.role_home(UserRole::User), "/dashboard");
    }
}

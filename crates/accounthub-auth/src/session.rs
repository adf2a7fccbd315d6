//! The session fact consumed by the authorization gateway.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use accounthub_entity::user::UserRole;

/// The authentication state of one inbound request.
///
/// Supplied by the identity-provider adapter (the session cookie decoder)
/// and recomputed on every request; the gateway only reads it. Credential
/// verification never happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFact {
    /// Whether the request carries a valid session.
    pub authenticated: bool,
    /// The authenticated subject, if any.
    pub subject_id: Option<Uuid>,
    /// The subject's role. Defaults to `User` for anonymous requests; the
    /// gateway only consults it when `authenticated` is true.
    pub role: UserRole,
}

impl SessionFact {
    /// A session fact for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            subject_id: None,
            role: UserRole::User,
        }
    }

    /// A session fact for an authenticated subject.
    pub fn authenticated(subject_id: Uuid, role: UserRole) -> Self {
        Self {
            authenticated: true,
            subject_id: Some(subject_id),
            role,
        }
    }

    /// Whether the session belongs to an admin.
    pub fn is_admin(&self) -> bool {
        self.authenticated && self.role.is_admin()
    }
}

//! Password-reset token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single-use, time-bounded credential authorizing one password change.
///
/// At most one valid token exists per identifier at any time; issuing a new
/// token replaces all prior tokens for the identifier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResetToken {
    /// The email address the token was issued for.
    pub identifier: String,
    /// Opaque URL-safe token value.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Check whether the token has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let live = ResetToken {
            identifier: "a@example.com".into(),
            token: "tok".into(),
            expires_at: now + Duration::hours(1),
        };
        let dead = ResetToken {
            identifier: "a@example.com".into(),
            token: "tok".into(),
            expires_at: now - Duration::seconds(1),
        };
        assert!(!live.is_expired(now));
        assert!(dead.is_expired(now));
    }
}

//! Cache key builders for all Accounthub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all Accounthub cache keys.
const PREFIX: &str = "accounthub";

/// Cache key for the admin dashboard statistics snapshot.
pub fn admin_stats() -> String {
    format!("{PREFIX}:stats:admin")
}

/// Cache key for a user entity by ID.
pub fn user_by_id(user_id: Uuid) -> String {
    format!("{PREFIX}:user:{user_id}")
}

/// Cache key for a user entity by email.
pub fn user_by_email(email: &str) -> String {
    format!("{PREFIX}:user:email:{}", email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_stats_key() {
        assert_eq!(admin_stats(), "accounthub:stats:admin");
    }

    #[test]
    fn test_user_key() {
        let id = Uuid::nil();
        assert_eq!(
            user_by_id(id),
            "accounthub:user:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_email_key_is_case_insensitive() {
        assert_eq!(user_by_email("A@Example.COM"), user_by_email("a@example.com"));
    }
}

//! Reset-token lifecycle manager.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use accounthub_core::config::auth::AuthConfig;
use accounthub_core::result::AppResult;
use accounthub_entity::reset::ResetToken;

use super::store::ResetTokenStore;
use super::token::generate_reset_token;

/// Issues, validates, and consumes password-reset tokens.
///
/// Issuing a new token for an identifier invalidates all prior tokens for
/// that identifier. Validation succeeds only on an exact, non-expired
/// match; consumption is idempotent.
#[derive(Clone)]
pub struct ResetTokenManager {
    /// Token persistence.
    store: Arc<dyn ResetTokenStore>,
    /// Token lifetime.
    ttl_hours: i64,
}

impl std::fmt::Debug for ResetTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetTokenManager")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl ResetTokenManager {
    /// Creates a new manager from auth configuration.
    pub fn new(store: Arc<dyn ResetTokenStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            ttl_hours: config.reset_token_ttl_hours as i64,
        }
    }

    /// Issues a fresh token for the identifier, replacing any prior tokens.
    pub async fn issue(&self, identifier: &str) -> AppResult<ResetToken> {
        let record = ResetToken {
            identifier: identifier.to_string(),
            token: generate_reset_token(),
            expires_at: Utc::now() + Duration::hours(self.ttl_hours),
        };

        self.store.replace(&record).await?;

        info!(identifier = %record.identifier, "Issued password reset token");
        Ok(record)
    }

    /// Checks whether (identifier, token) names a live token. Expired and
    /// mismatched tokens fail identically.
    pub async fn validate(&self, identifier: &str, token: &str) -> AppResult<bool> {
        Ok(self.store.find_valid(identifier, token).await?.is_some())
    }

    /// Deletes the token after the change it guarded has been durably
    /// applied. Deleting an already-consumed token is a no-op.
    pub async fn consume(&self, identifier: &str, token: &str) -> AppResult<bool> {
        let deleted = self.store.delete(identifier, token).await?;
        if deleted {
            info!(identifier, "Consumed password reset token");
        }
        Ok(deleted)
    }

    /// Removes expired rows. Lookups already exclude them; this only
    /// reclaims storage.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        self.store.delete_expired().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// In-memory token store mirroring the repository contract.
    #[derive(Debug, Default)]
    struct MemoryStore {
        rows: Mutex<HashMap<String, ResetToken>>,
    }

    #[async_trait]
    impl ResetTokenStore for MemoryStore {
        async fn find_valid(
            &self,
            identifier: &str,
            token: &str,
        ) -> AppResult<Option<ResetToken>> {
            let rows = self.rows.lock().await;
            Ok(rows.get(identifier).cloned().filter(|row| {
                row.token == token && !row.is_expired(Utc::now())
            }))
        }

        async fn replace(&self, record: &ResetToken) -> AppResult<()> {
            let mut rows = self.rows.lock().await;
            rows.insert(record.identifier.clone(), record.clone());
            Ok(())
        }

        async fn delete(&self, identifier: &str, token: &str) -> AppResult<bool> {
            let mut rows = self.rows.lock().await;
            let matches = rows
                .get(identifier)
                .is_some_and(|row| row.token == token);
            if matches {
                rows.remove(identifier);
            }
            Ok(matches)
        }

        async fn delete_expired(&self) -> AppResult<u64> {
            let mut rows = self.rows.lock().await;
            let now = Utc::now();
            let before = rows.len();
            rows.retain(|_, row| !row.is_expired(now));
            Ok((before - rows.len()) as u64)
        }
    }

    fn manager() -> ResetTokenManager {
        ResetTokenManager::new(Arc::new(MemoryStore::default()), &AuthConfig::default())
    }

    #[tokio::test]
    async fn test_issue_then_validate() {
        let mgr = manager();
        let issued = mgr.issue("a@example.com").await.unwrap();
        assert!(mgr.validate("a@example.com", &issued.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_rejects_wrong_token() {
        let mgr = manager();
        mgr.issue("a@example.com").await.unwrap();
        assert!(!mgr.validate("a@example.com", "bogus").await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_rejects_wrong_identifier() {
        let mgr = manager();
        let issued = mgr.issue("a@example.com").await.unwrap();
        assert!(!mgr.validate("b@example.com", &issued.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_second_issue_invalidates_first() {
        let mgr = manager();
        let first = mgr.issue("a@example.com").await.unwrap();
        let second = mgr.issue("a@example.com").await.unwrap();

        assert!(!mgr.validate("a@example.com", &first.token).await.unwrap());
        assert!(mgr.validate("a@example.com", &second.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_consumed_token_fails_revalidation() {
        let mgr = manager();
        let issued = mgr.issue("a@example.com").await.unwrap();

        assert!(mgr.validate("a@example.com", &issued.token).await.unwrap());
        assert!(mgr.consume("a@example.com", &issued.token).await.unwrap());
        assert!(!mgr.validate("a@example.com", &issued.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_is_idempotent() {
        let mgr = manager();
        let issued = mgr.issue("a@example.com").await.unwrap();

        assert!(mgr.consume("a@example.com", &issued.token).await.unwrap());
        // Second delete is a no-op, not an error.
        assert!(!mgr.consume("a@example.com", &issued.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_token_fails_validation() {
        let store = Arc::new(MemoryStore::default());
        let mgr = ResetTokenManager::new(store.clone(), &AuthConfig::default());

        let expired = ResetToken {
            identifier: "a@example.com".into(),
            token: generate_reset_token(),
            expires_at: Utc::now() - Duration::seconds(1),
        };
        store.replace(&expired).await.unwrap();

        assert!(!mgr.validate("a@example.com", &expired.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_rows() {
        let store = Arc::new(MemoryStore::default());
        let mgr = ResetTokenManager::new(store.clone(), &AuthConfig::default());

        let expired = ResetToken {
            identifier: "old@example.com".into(),
            token: generate_reset_token(),
            expires_at: Utc::now() - Duration::hours(1),
        };
        store.replace(&expired).await.unwrap();
        mgr.issue("fresh@example.com").await.unwrap();

        assert_eq!(mgr.sweep_expired().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_issued_token_expires_in_the_future() {
        let mgr = manager();
        let issued = mgr.issue("a@example.com").await.unwrap();
        let remaining = issued.expires_at - Utc::now();
        assert!(remaining > Duration::hours(23));
        assert!(remaining <= Duration::hours(24));
    }
}

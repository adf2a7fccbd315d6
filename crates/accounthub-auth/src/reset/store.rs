//! Narrow persistence seam for reset tokens.
//!
//! The store exposes only the operations the lifecycle needs: lookup by
//! identifier+token, atomic rotation (delete-by-identifier plus insert),
//! idempotent deletion, and an expiry sweep. Keeping the seam this narrow
//! lets tests run against an in-memory implementation.

use async_trait::async_trait;

use accounthub_core::result::AppResult;
use accounthub_database::repositories::reset_token::ResetTokenRepository;
use accounthub_entity::reset::ResetToken;

/// Persistence operations required by the reset-token lifecycle.
#[async_trait]
pub trait ResetTokenStore: Send + Sync + 'static {
    /// Find the non-expired row matching both identifier and token exactly.
    async fn find_valid(&self, identifier: &str, token: &str) -> AppResult<Option<ResetToken>>;

    /// Atomically delete all rows for the record's identifier and insert the
    /// record. The two writes must be a single unit so concurrent issuance
    /// can never leave two valid tokens for one identifier.
    async fn replace(&self, record: &ResetToken) -> AppResult<()>;

    /// Delete the row matching identifier and token. Returns `true` if a
    /// row was deleted; deleting an absent row is a no-op, not an error.
    async fn delete(&self, identifier: &str, token: &str) -> AppResult<bool>;

    /// Delete all expired rows, returning how many were removed.
    async fn delete_expired(&self) -> AppResult<u64>;
}

#[async_trait]
impl ResetTokenStore for ResetTokenRepository {
    async fn find_valid(&self, identifier: &str, token: &str) -> AppResult<Option<ResetToken>> {
        ResetTokenRepository::find_valid(self, identifier, token).await
    }

    async fn replace(&self, record: &ResetToken) -> AppResult<()> {
        ResetTokenRepository::replace(self, record).await
    }

    async fn delete(&self, identifier: &str, token: &str) -> AppResult<bool> {
        ResetTokenRepository::delete(self, identifier, token).await
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        ResetTokenRepository::delete_expired(self).await
    }
}

//! Password-reset flow: request and confirm.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use accounthub_auth::password::{PasswordHasher, PasswordValidator};
use accounthub_auth::reset::ResetTokenManager;
use accounthub_core::error::AppError;
use accounthub_database::repositories::user::UserRepository;

/// Delivers a freshly issued reset token to the account holder.
///
/// Delivery is fire-and-forget from the reset flow's perspective; a
/// delivery failure must not fail the request, or the response would leak
/// whether the account exists.
#[async_trait]
pub trait ResetMailer: Send + Sync + 'static {
    /// Hand over an (identifier, token) pair for delivery.
    async fn send_reset_token(&self, identifier: &str, token: &str);
}

/// Development mailer that writes the token to the log instead of sending
/// email.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl ResetMailer for LogMailer {
    async fn send_reset_token(&self, identifier: &str, token: &str) {
        info!(identifier, token, "Password reset token issued (log delivery)");
    }
}

/// Orchestrates the password-reset request and confirm operations.
#[derive(Clone)]
pub struct ResetService {
    /// Token lifecycle manager.
    tokens: Arc<ResetTokenManager>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token delivery.
    mailer: Arc<dyn ResetMailer>,
}

impl std::fmt::Debug for ResetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetService").finish()
    }
}

impl ResetService {
    /// Creates a new reset service.
    pub fn new(
        tokens: Arc<ResetTokenManager>,
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        mailer: Arc<dyn ResetMailer>,
    ) -> Self {
        Self {
            tokens,
            user_repo,
            hasher,
            validator,
            mailer,
        }
    }

    /// Handles a reset request for the given email.
    ///
    /// The outcome is identical whether or not an account exists: the
    /// existence check happens privately, a token is only issued for real
    /// accounts, and the caller always gets `Ok(())`. The residual timing
    /// difference between the two branches is accepted (see DESIGN.md).
    pub async fn request_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            info!("Password reset requested for unknown identifier");
            return Ok(());
        };

        let issued = self.tokens.issue(&user.email).await?;
        self.mailer
            .send_reset_token(&issued.identifier, &issued.token)
            .await;

        Ok(())
    }

    /// Confirms a reset: validates the token, applies the new password, then
    /// consumes the token.
    ///
    /// All token failures (expired, mismatched, already consumed, unknown
    /// identifier) surface as the one uniform invalid-or-expired error. The
    /// password update is applied before the token is deleted: if the update
    /// fails the token stays valid for a retry, and deleting an
    /// already-deleted token under a concurrent retry is a no-op.
    pub async fn confirm_reset(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.validator.validate(new_password)?;

        if !self.tokens.validate(email, token).await? {
            return Err(AppError::invalid_token());
        }

        let Some(user) = self.user_repo.find_by_email(email).await? else {
            // Token rows are only ever issued for existing accounts; a
            // vanished account fails the same way as a bad token.
            return Err(AppError::invalid_token());
        };

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user.id, &new_hash).await?;

        if !self.tokens.consume(email, token).await? {
            // A concurrent confirm already deleted it; the update above
            // succeeded, so this is not an error.
            warn!(identifier = %email, "Reset token already consumed");
        }

        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }

    /// Removes expired token rows.
    pub async fn sweep_expired_tokens(&self) -> Result<u64, AppError> {
        self.tokens.sweep_expired().await
    }
}

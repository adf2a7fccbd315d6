//! Password-reset token repository implementation.
//!
//! Token rotation (delete all tokens for an identifier, insert the new one)
//! runs inside a single transaction so two concurrent issuances can never
//! leave two simultaneously-valid tokens for the same identifier.

use sqlx::PgPool;
use tracing::debug;

use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_entity::reset::ResetToken;

/// Repository for password-reset token rows.
#[derive(Debug, Clone)]
pub struct ResetTokenRepository {
    pool: PgPool,
}

impl ResetTokenRepository {
    /// Create a new reset token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the token row matching both identifier and token exactly,
    /// excluding expired rows.
    pub async fn find_valid(&self, identifier: &str, token: &str) -> AppResult<Option<ResetToken>> {
        sqlx::query_as::<_, ResetToken>(
            "SELECT * FROM password_reset_tokens \
             WHERE identifier = $1 AND token = $2 AND expires_at > NOW()",
        )
        .bind(identifier)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reset token", e))
    }

    /// List all token rows for an identifier, including expired ones.
    pub async fn find_by_identifier(&self, identifier: &str) -> AppResult<Vec<ResetToken>> {
        sqlx::query_as::<_, ResetToken>(
            "SELECT * FROM password_reset_tokens WHERE identifier = $1",
        )
        .bind(identifier)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reset tokens", e)
        })
    }

    /// Atomically replace all tokens for the record's identifier with the
    /// given record: delete-by-identifier plus insert in one transaction.
    pub async fn replace(&self, record: &ResetToken) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE identifier = $1")
            .bind(&record.identifier)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete prior tokens", e)
            })?;

        sqlx::query(
            "INSERT INTO password_reset_tokens (identifier, token, expires_at) \
             VALUES ($1, $2, $3)",
        )
        .bind(&record.identifier)
        .bind(&record.token)
        .bind(record.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert reset token", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit token rotation", e)
        })?;

        Ok(())
    }

    /// Delete the row matching identifier and token. Returns `true` if a row
    /// was deleted; deleting an already-absent token is not an error.
    pub async fn delete(&self, identifier: &str, token: &str) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM password_reset_tokens WHERE identifier = $1 AND token = $2")
                .bind(identifier)
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete reset token", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all expired token rows. Lookups already exclude expired rows;
    /// this sweep only reclaims storage.
    pub async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired tokens", e)
            })?;

        let count = result.rows_affected();
        if count > 0 {
            debug!(count, "Swept expired reset tokens");
        }
        Ok(count)
    }
}

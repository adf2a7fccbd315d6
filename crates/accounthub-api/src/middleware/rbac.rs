//! Role checks for API handlers.

use accounthub_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the admin role.
///
/// Role mismatch is reported as 401, indistinguishable from an
/// unauthenticated request, so the admin API surface is never confirmed to
/// non-admins.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::unauthorized("Admin access required"));
    }
    Ok(())
}

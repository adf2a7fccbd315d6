//! User statistics snapshot.

use serde::{Deserialize, Serialize};

/// Aggregate user counts shown on the admin dashboard.
///
/// Snapshots are cached; `from_cache` reports whether the returned value
/// came from the cache or was freshly computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Total registered users.
    pub total_users: i64,
    /// Users created in the trailing 7-day window.
    pub recent_users: i64,
    /// Estimated active users.
    pub active_users: i64,
    /// Users with the admin role.
    pub total_admins: i64,
    /// Whether this snapshot was served from the cache.
    #[serde(default)]
    pub from_cache: bool,
}

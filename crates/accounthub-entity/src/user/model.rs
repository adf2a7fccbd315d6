//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Human-readable display name.
    pub name: Option<String>,
    /// Email address (unique login identifier).
    pub email: String,
    /// When the email address was verified, if ever.
    pub email_verified: Option<DateTime<Utc>>,
    /// Avatar image URL.
    pub image: Option<String>,
    /// Argon2 password hash. Absent for accounts provisioned through an
    /// external identity provider.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// User role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the account can authenticate with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: Uuid,
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

//! Account self-service operations — registration, login credential checks,
//! profile viewing, and password changes.

use std::sync::Arc;

use tracing::info;

use accounthub_auth::password::{PasswordHasher, PasswordValidator};
use accounthub_core::error::AppError;
use accounthub_database::repositories::user::UserRepository;
use accounthub_entity::user::model::{CreateUser, UpdateUser};
use accounthub_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Handles account self-service operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
}

/// Data for updating a user's own profile.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name (optional).
    pub name: Option<String>,
    /// New email (optional).
    pub email: Option<String>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
        }
    }

    /// Registers a new regular-user account.
    pub async fn register(
        &self,
        name: Option<String>,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        self.validator.validate(password)?;

        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name,
                email: email.to_string(),
                password_hash: Some(password_hash),
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "Registered new account");
        Ok(user)
    }

    /// Verifies login credentials, returning the user on success.
    ///
    /// Invalid email and invalid password fail identically.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(user)
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        if let Some(email) = &req.email {
            if !email.contains('@') || !email.contains('.') {
                return Err(AppError::validation("Invalid email format"));
            }

            // Check the email is not taken by another account.
            if let Some(existing) = self.user_repo.find_by_email(email).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict("Email is already taken by another user"));
                }
            }
        }

        let user = self
            .user_repo
            .update(&UpdateUser {
                id: ctx.user_id,
                name: req.name,
                email: req.email,
            })
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::validation("Account has no password set"))?;

        if !self.hasher.verify_password(current_password, hash)? {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(ctx.user_id, &new_hash)
            .await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }
}

//! User self-service: profile and password.

use std::sync::Arc;

use tracing::info;

use fithub_auth::password::{PasswordHasher, PasswordValidator};
use fithub_core::{AppError, AppResult};
use fithub_database::repositories::UserRepository;
use fithub_entity::user::User;

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
}

/// Password change input.
#[derive(Debug, Clone)]
pub struct ChangePassword {
    /// Current password; ignored for accounts that never had one.
    pub current_password: Option<String>,
    /// Replacement password.
    pub new_password: String,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Gets the current user's record.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Renames the current user.
    pub async fn update_name(&self, ctx: &RequestContext, name: &str) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }

        let mut user = self.get_profile(ctx).await?;
        user.name = name.to_string();
        let user = self.users.update(&user).await?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password.
    ///
    /// Accounts created through an external provider have no password yet
    /// and may set one without supplying a current password.
    pub async fn change_password(&self, ctx: &RequestContext, req: ChangePassword) -> AppResult<()> {
        let mut user = self.get_profile(ctx).await?;

        if let Some(hash) = user.password_hash.as_deref() {
            let current = req.current_password.as_deref().unwrap_or_default();
            if !self.hasher.verify_password(current, hash)? {
                return Err(AppError::unauthorized("Current password is incorrect"));
            }
            self.validator.validate_not_same(current, &req.new_password)?;
        }

        self.validator
            .validate(&req.new_password, &[user.email.as_str(), user.name.as_str()])?;

        user.password_hash = Some(self.hasher.hash_password(&req.new_password)?);
        self.users.update(&user).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }
}

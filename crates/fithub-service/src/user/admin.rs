//! Admin user management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use fithub_core::types::{PageRequest, PageResponse};
use fithub_core::{AppError, AppResult};
use fithub_database::repositories::UserRepository;
use fithub_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Handles administrative user management operations.
#[derive(Clone)]
pub struct AdminUserService {
    /// User store.
    users: Arc<dyn UserRepository>,
}

/// Fields an administrator may change.
#[derive(Debug, Clone, Default)]
pub struct AdminUpdateUser {
    /// New display name.
    pub name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// Activate or deactivate the account.
    pub is_active: Option<bool>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Lists users with pagination, optionally filtered by role.
    pub async fn list_users(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.users.list(role, &page.normalized()).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates a user.
    ///
    /// Granting or revoking `admin`/`super-admin`, and deactivating an
    /// administrator, require a super-admin. Nobody may change their own
    /// role or deactivate themselves.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: AdminUpdateUser,
    ) -> AppResult<User> {
        let mut user = self.get_user(user_id).await?;

        let role_change = req.role.filter(|r| *r != user.role);
        let deactivation = req.is_active == Some(false) && user.is_active;

        if user_id == ctx.user_id && (role_change.is_some() || deactivation) {
            return Err(AppError::validation(
                "You cannot change your own role or deactivate yourself",
            ));
        }

        let touches_admin = role_change.is_some_and(|new| new.is_admin_level() || user.role.is_admin_level())
            || (deactivation && user.role.is_admin_level());
        if touches_admin && !ctx.is_super_admin() {
            return Err(AppError::forbidden("Access denied"));
        }

        if let Some(name) = req.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::validation("Name must not be empty"));
            }
            user.name = name.to_string();
        }
        if let Some(role) = role_change {
            user.role = role;
        }
        if let Some(active) = req.is_active {
            user.is_active = active;
        }

        let user = self.users.update(&user).await?;
        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            role = %user.role,
            is_active = user.is_active,
            "User updated by admin"
        );
        Ok(user)
    }
}

//! User store operations.

use async_trait::async_trait;
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_core::types::{PageRequest, PageResponse};
use fithub_entity::user::{CreateUser, User, UserRole};

/// Persistence of user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Overwrite the mutable fields of an existing user.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: Uuid) -> AppResult<()>;

    /// List users, newest first, optionally filtered by role.
    async fn list(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>>;

    /// Number of users holding each role.
    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, u64)>>;
}

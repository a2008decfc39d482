use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use fithub_core::types::{PageRequest, PageResponse};
use fithub_core::{AppError, AppResult};
use fithub_entity::user::model::normalize_email;
use fithub_entity::user::{CreateUser, User, UserRole};

use super::{db_error, violates};
use crate::repositories::UserRepository;

/// User repository over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let user = data.into_user();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, password_hash, role, is_active, oauth_provider, \
                                created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.is_active)
        .bind(&user.oauth_provider)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "users_email_key") {
                AppError::conflict("Email is already registered")
            } else {
                AppError::with_source(fithub_core::ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, password_hash = $3, role = $4, is_active = $5, \
                              oauth_provider = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.is_active)
        .bind(&user.oauth_provider)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))
    }

    async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update last login"))?;
        Ok(())
    }

    async fn list(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::user_role IS NULL OR role = $1)")
                .bind(role)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count users"))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE ($1::user_role IS NULL OR role = $1) \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(role)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list users"))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, u64)>> {
        let rows: Vec<(UserRole, i64)> =
            sqlx::query_as("SELECT role, COUNT(*) FROM users GROUP BY role")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("Failed to count users by role"))?;

        Ok(UserRole::ALL
            .iter()
            .map(|role| {
                let n = rows
                    .iter()
                    .find(|(r, _)| r == role)
                    .map_or(0, |(_, n)| *n as u64);
                (*role, n)
            })
            .collect())
    }
}

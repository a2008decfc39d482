use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fithub_core::{AppError, AppResult, ErrorKind};
use fithub_entity::membership::{Membership, MembershipStatus};

use super::{db_error, violates};
use crate::repositories::MembershipRepository;

const ONE_ACTIVE_CONSTRAINT: &str = "memberships_one_active_per_user";

/// Membership repository over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new membership repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if violates(&e, ONE_ACTIVE_CONSTRAINT) {
            AppError::conflict("User already has an active membership")
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find membership"))
    }

    async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find active membership"))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list memberships"))
    }

    async fn create(&self, m: &Membership) -> AppResult<Membership> {
        sqlx::query_as::<_, Membership>(
            "INSERT INTO memberships (id, user_id, plan_id, status, start_date, end_date, \
                                      auto_renew, frozen_until, cancelled_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(m.id)
        .bind(m.user_id)
        .bind(m.plan_id)
        .bind(m.status)
        .bind(m.start_date)
        .bind(m.end_date)
        .bind(m.auto_renew)
        .bind(m.frozen_until)
        .bind(m.cancelled_at)
        .bind(m.created_at)
        .bind(m.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create membership"))
    }

    async fn update(&self, m: &Membership) -> AppResult<Membership> {
        sqlx::query_as::<_, Membership>(
            "UPDATE memberships SET plan_id = $2, status = $3, start_date = $4, end_date = $5, \
                                    auto_renew = $6, frozen_until = $7, cancelled_at = $8, \
                                    updated_at = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(m.id)
        .bind(m.plan_id)
        .bind(m.status)
        .bind(m.start_date)
        .bind(m.end_date)
        .bind(m.auto_renew)
        .bind(m.frozen_until)
        .bind(m.cancelled_at)
        .bind(m.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error("Failed to update membership"))?
        .ok_or_else(|| AppError::not_found(format!("Membership {} not found", m.id)))
    }

    async fn list_due(&self, now: DateTime<Utc>) -> AppResult<Vec<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE status = 'active' AND end_date <= $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list due memberships"))
    }

    async fn count_by_status(&self) -> AppResult<Vec<(MembershipStatus, u64)>> {
        let rows: Vec<(MembershipStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM memberships GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("Failed to count memberships"))?;

        Ok(MembershipStatus::ALL
            .iter()
            .map(|status| {
                let n = rows
                    .iter()
                    .find(|(s, _)| s == status)
                    .map_or(0, |(_, n)| *n as u64);
                (*status, n)
            })
            .collect())
    }
}

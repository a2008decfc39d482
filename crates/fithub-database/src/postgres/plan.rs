use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use fithub_core::{AppError, AppResult};
use fithub_entity::membership::{CreatePlan, MembershipPlan};

use super::db_error;
use crate::repositories::PlanRepository;

/// Plan repository over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    /// Create a new plan repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipPlan>> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find plan"))
    }

    async fn list(&self, include_inactive: bool) -> AppResult<Vec<MembershipPlan>> {
        sqlx::query_as::<_, MembershipPlan>(
            "SELECT * FROM membership_plans WHERE ($1 OR is_active) ORDER BY price_cents, name",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list plans"))
    }

    async fn create(&self, data: CreatePlan) -> AppResult<MembershipPlan> {
        let plan = data.into_plan();
        sqlx::query_as::<_, MembershipPlan>(
            "INSERT INTO membership_plans (id, name, description, duration_days, price_cents, \
                                           currency, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(plan.id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.duration_days)
        .bind(plan.price_cents)
        .bind(&plan.currency)
        .bind(plan.is_active)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create plan"))
    }

    async fn update(&self, plan: &MembershipPlan) -> AppResult<MembershipPlan> {
        sqlx::query_as::<_, MembershipPlan>(
            "UPDATE membership_plans SET name = $2, description = $3, duration_days = $4, \
                                         price_cents = $5, is_active = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(plan.id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.duration_days)
        .bind(plan.price_cents)
        .bind(plan.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update plan"))?
        .ok_or_else(|| AppError::not_found(format!("Plan {} not found", plan.id)))
    }
}

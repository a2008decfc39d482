use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_entity::membership::MembershipOrder;

use super::db_error;
use crate::repositories::{OrderRepository, PlanRevenue};

/// Order repository over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, o: &MembershipOrder) -> AppResult<MembershipOrder> {
        sqlx::query_as::<_, MembershipOrder>(
            "INSERT INTO membership_orders (id, user_id, plan_id, membership_id, kind, amount_cents, \
                                            currency, status, payment_reference, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(o.id)
        .bind(o.user_id)
        .bind(o.plan_id)
        .bind(o.membership_id)
        .bind(o.kind)
        .bind(o.amount_cents)
        .bind(&o.currency)
        .bind(o.status)
        .bind(&o.payment_reference)
        .bind(o.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create order"))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<MembershipOrder>> {
        sqlx::query_as::<_, MembershipOrder>(
            "SELECT * FROM membership_orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list orders"))
    }

    async fn revenue_by_plan(&self) -> AppResult<Vec<PlanRevenue>> {
        sqlx::query_as::<_, PlanRevenue>(
            "SELECT plan_id, currency, SUM(amount_cents)::BIGINT AS total_cents, \
                    COUNT(*) AS orders \
             FROM membership_orders WHERE status = 'paid' \
             GROUP BY plan_id, currency ORDER BY plan_id, currency",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to aggregate revenue"))
    }

    async fn count(&self) -> AppResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM membership_orders")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count orders"))?;
        Ok(n as u64)
    }
}

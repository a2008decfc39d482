//! Order store operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_entity::membership::MembershipOrder;

/// Paid revenue of one plan in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlanRevenue {
    /// Plan charged for.
    pub plan_id: Uuid,
    /// Currency of the amounts.
    pub currency: String,
    /// Sum of paid orders in minor units.
    pub total_cents: i64,
    /// Number of paid orders.
    pub orders: i64,
}

/// Persistence of membership orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order.
    async fn create(&self, order: &MembershipOrder) -> AppResult<MembershipOrder>;

    /// Orders placed by a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<MembershipOrder>>;

    /// Paid revenue grouped by plan and currency.
    async fn revenue_by_plan(&self) -> AppResult<Vec<PlanRevenue>>;

    /// Total number of orders.
    async fn count(&self) -> AppResult<u64>;
}

//! Plan catalogue store operations.

use async_trait::async_trait;
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_entity::membership::{CreatePlan, MembershipPlan};

/// Persistence of membership plans.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Find a plan by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipPlan>>;

    /// List plans ordered by price. Retired plans only when `include_inactive`.
    async fn list(&self, include_inactive: bool) -> AppResult<Vec<MembershipPlan>>;

    /// Insert a new plan.
    async fn create(&self, data: CreatePlan) -> AppResult<MembershipPlan>;

    /// Overwrite an existing plan.
    async fn update(&self, plan: &MembershipPlan) -> AppResult<MembershipPlan>;
}

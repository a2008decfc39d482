use async_trait::async_trait;
use uuid::Uuid;

use fithub_core::{AppError, AppResult};
use fithub_entity::membership::{CreatePlan, MembershipPlan};

use super::MemoryStore;
use crate::repositories::PlanRepository;

#[async_trait]
impl PlanRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipPlan>> {
        Ok(self.plans.get(&id).map(|p| p.value().clone()))
    }

    async fn list(&self, include_inactive: bool) -> AppResult<Vec<MembershipPlan>> {
        let mut plans: Vec<MembershipPlan> = self
            .plans
            .iter()
            .filter(|p| include_inactive || p.is_active)
            .map(|p| p.value().clone())
            .collect();
        plans.sort_by(|a, b| a.price_cents.cmp(&b.price_cents).then(a.name.cmp(&b.name)));
        Ok(plans)
    }

    async fn create(&self, data: CreatePlan) -> AppResult<MembershipPlan> {
        let plan = data.into_plan();
        self.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update(&self, plan: &MembershipPlan) -> AppResult<MembershipPlan> {
        let mut stored = self
            .plans
            .get_mut(&plan.id)
            .ok_or_else(|| AppError::not_found(format!("Plan {} not found", plan.id)))?;
        *stored = plan.clone();
        Ok(stored.clone())
    }
}

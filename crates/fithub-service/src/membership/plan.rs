//! Plan catalogue management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use fithub_core::{AppError, AppResult};
use fithub_database::repositories::PlanRepository;
use fithub_entity::membership::{CreatePlan, MembershipPlan, UpdatePlan};

/// Reads and maintains the plan catalogue.
#[derive(Clone)]
pub struct PlanService {
    plans: Arc<dyn PlanRepository>,
}

impl PlanService {
    /// Creates a new plan service.
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Plans on sale, cheapest first.
    pub async fn list_active(&self) -> AppResult<Vec<MembershipPlan>> {
        self.plans.list(false).await
    }

    /// Every plan including retired ones.
    pub async fn list_all(&self) -> AppResult<Vec<MembershipPlan>> {
        self.plans.list(true).await
    }

    /// Gets a plan by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<MembershipPlan> {
        self.plans
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))
    }

    /// Adds a plan to the catalogue.
    pub async fn create(&self, data: CreatePlan) -> AppResult<MembershipPlan> {
        validate_terms(Some(data.duration_days), Some(data.price_cents))?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Plan name must not be empty"));
        }
        if data.currency.len() != 3 || !data.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::validation("Currency must be a three-letter ISO code"));
        }
        let plan = self.plans.create(data).await?;
        info!(plan_id = %plan.id, name = %plan.name, "Plan created");
        Ok(plan)
    }

    /// Changes a plan. Existing memberships keep their current period.
    pub async fn update(&self, id: Uuid, data: UpdatePlan) -> AppResult<MembershipPlan> {
        validate_terms(data.duration_days, data.price_cents)?;
        if data.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Plan name must not be empty"));
        }
        let mut plan = self.get(id).await?;
        data.apply(&mut plan);
        let plan = self.plans.update(&plan).await?;
        info!(plan_id = %plan.id, is_active = plan.is_active, "Plan updated");
        Ok(plan)
    }
}

fn validate_terms(duration_days: Option<i32>, price_cents: Option<i64>) -> AppResult<()> {
    if duration_days.is_some_and(|d| d <= 0) {
        return Err(AppError::validation("Duration must be at least one day"));
    }
    if price_cents.is_some_and(|p| p < 0) {
        return Err(AppError::validation("Price must not be negative"));
    }
    Ok(())
}

//! Membership lifecycle: purchase, renewal, cancellation, freezing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use fithub_core::types::{PageRequest, PageResponse};
use fithub_core::{AppError, AppResult};
use fithub_database::Repositories;
use fithub_database::repositories::{
    MembershipRepository, OrderRepository, PlanRepository, UserRepository,
};
use fithub_entity::membership::{
    Membership, MembershipOrder, MembershipPlan, MembershipStatus, OrderKind,
};
use fithub_entity::user::{UserProfile, UserRole};

use crate::context::RequestContext;

/// Purchase input.
#[derive(Debug, Clone)]
pub struct Purchase {
    /// Plan to buy.
    pub plan_id: Uuid,
    /// Renew automatically at the end of each period.
    pub auto_renew: bool,
    /// Reference issued by the payment processor.
    pub payment_reference: Option<String>,
}

/// A membership with the derived fields clients display.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipView {
    /// The stored record.
    #[serde(flatten)]
    pub membership: Membership,
    /// Name of the plan.
    pub plan_name: String,
    /// Whether access is paused right now.
    pub is_frozen: bool,
    /// Whole days left in the current period.
    pub days_remaining: i64,
}

/// Result of a purchase or renewal.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseResult {
    /// The created or extended membership.
    pub membership: MembershipView,
    /// The recorded order.
    pub order: MembershipOrder,
}

/// Outcome of settling one due membership.
enum Settled {
    Expired,
    Renewed,
    Unchanged,
}

/// A member with their current membership, for staff views.
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    /// The member.
    pub user: UserProfile,
    /// Their active membership, if any.
    pub membership: Option<MembershipView>,
}

/// The caller's membership state.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipOverview {
    /// The active membership, if any.
    pub current: Option<MembershipView>,
    /// Every membership, newest first.
    pub history: Vec<MembershipView>,
    /// Orders, newest first.
    pub orders: Vec<MembershipOrder>,
}

/// Orchestrates memberships, plans, and orders.
#[derive(Clone)]
pub struct MembershipService {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
    memberships: Arc<dyn MembershipRepository>,
    orders: Arc<dyn OrderRepository>,
    max_freeze_days: u32,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(repos: &Repositories, max_freeze_days: u32) -> Self {
        Self {
            users: repos.users.clone(),
            plans: repos.plans.clone(),
            memberships: repos.memberships.clone(),
            orders: repos.orders.clone(),
            max_freeze_days,
        }
    }

    /// The user's active membership, expiring it first if its period is over.
    pub async fn current(&self, user_id: Uuid) -> AppResult<Option<Membership>> {
        let Some(mut membership) = self.memberships.find_active_for_user(user_id).await? else {
            return Ok(None);
        };
        if membership.refresh_status(Utc::now()) {
            self.memberships.update(&membership).await?;
            info!(membership_id = %membership.id, "Membership expired on read");
            return Ok(None);
        }
        Ok(Some(membership))
    }

    /// The caller's current membership, history, and orders.
    pub async fn overview(&self, ctx: &RequestContext) -> AppResult<MembershipOverview> {
        let current = match self.current(ctx.user_id).await? {
            Some(m) => Some(self.view(m).await?),
            None => None,
        };

        let now = Utc::now();
        let mut history = Vec::new();
        for mut m in self.memberships.list_for_user(ctx.user_id).await? {
            m.refresh_status(now);
            history.push(self.view(m).await?);
        }

        let orders = self.orders.list_for_user(ctx.user_id).await?;
        Ok(MembershipOverview {
            current,
            history,
            orders,
        })
    }

    /// Buy a plan. Fails with `Conflict` while another membership is active.
    pub async fn purchase(&self, ctx: &RequestContext, req: Purchase) -> AppResult<PurchaseResult> {
        let plan = self.plan_on_sale(req.plan_id).await?;

        if self.current(ctx.user_id).await?.is_some() {
            return Err(AppError::conflict("You already have an active membership"));
        }

        let membership = Membership::start(ctx.user_id, &plan, req.auto_renew, Utc::now());
        let membership = self.memberships.create(&membership).await?;
        let order = MembershipOrder::paid(&membership, &plan, OrderKind::Purchase, req.payment_reference);
        let order = self.orders.create(&order).await?;

        info!(
            user_id = %ctx.user_id,
            membership_id = %membership.id,
            plan = %plan.name,
            "Membership purchased"
        );
        Ok(PurchaseResult {
            membership: view_with_plan(membership, &plan),
            order,
        })
    }

    /// Renew a membership for one more period of its plan.
    pub async fn renew(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        payment_reference: Option<String>,
    ) -> AppResult<PurchaseResult> {
        let mut membership = self.load_accessible(ctx, id).await?;
        let plan = self.plan_on_sale(membership.plan_id).await?;

        membership.renew(&plan, Utc::now())?;
        let membership = self.memberships.update(&membership).await?;
        let order = MembershipOrder::paid(&membership, &plan, OrderKind::Renewal, payment_reference);
        let order = self.orders.create(&order).await?;

        info!(actor = %ctx.user_id, membership_id = %membership.id, "Membership renewed");
        Ok(PurchaseResult {
            membership: view_with_plan(membership, &plan),
            order,
        })
    }

    /// Cancel an active membership.
    pub async fn cancel(&self, ctx: &RequestContext, id: Uuid) -> AppResult<MembershipView> {
        let mut membership = self.load_accessible(ctx, id).await?;
        membership.cancel(Utc::now())?;
        let membership = self.memberships.update(&membership).await?;
        info!(actor = %ctx.user_id, membership_id = %membership.id, "Membership cancelled");
        self.view(membership).await
    }

    /// Pause an active membership for `days`.
    pub async fn freeze(&self, ctx: &RequestContext, id: Uuid, days: u32) -> AppResult<MembershipView> {
        let mut membership = self.load_accessible(ctx, id).await?;
        membership.freeze(days, self.max_freeze_days, Utc::now())?;
        let membership = self.memberships.update(&membership).await?;
        info!(actor = %ctx.user_id, membership_id = %membership.id, days, "Membership frozen");
        self.view(membership).await
    }

    /// Members with their active membership, for staff.
    pub async fn roster(&self, page: PageRequest) -> AppResult<PageResponse<MemberSummary>> {
        let users = self
            .users
            .list(Some(UserRole::Member), &page.normalized())
            .await?;

        let mut items = Vec::with_capacity(users.items.len());
        for user in &users.items {
            let membership = match self.current(user.id).await? {
                Some(m) => Some(self.view(m).await?),
                None => None,
            };
            items.push(MemberSummary {
                user: user.profile(),
                membership,
            });
        }

        Ok(PageResponse {
            items,
            total: users.total,
            page: users.page,
            per_page: users.per_page,
            total_pages: users.total_pages,
        })
    }

    /// Expire or auto-renew every membership whose period ended by `now`.
    ///
    /// A membership that fails to settle is logged and left for the next
    /// sweep. Returns `(expired, renewed)`.
    pub async fn settle_due(&self, now: DateTime<Utc>) -> AppResult<(u64, u64)> {
        let mut expired = 0;
        let mut renewed = 0;

        for membership in self.memberships.list_due(now).await? {
            let id = membership.id;
            match self.settle_one(membership, now).await {
                Ok(Settled::Renewed) => renewed += 1,
                Ok(Settled::Expired) => expired += 1,
                Ok(Settled::Unchanged) => {}
                Err(e) => warn!(membership_id = %id, error = %e, "Failed to settle membership"),
            }
        }

        Ok((expired, renewed))
    }

    async fn settle_one(&self, mut membership: Membership, now: DateTime<Utc>) -> AppResult<Settled> {
        let plan = if membership.auto_renew {
            self.plans
                .find_by_id(membership.plan_id)
                .await?
                .filter(|p| p.is_active)
        } else {
            None
        };

        match plan {
            Some(plan) => {
                membership.renew(&plan, now)?;
                let membership = self.memberships.update(&membership).await?;
                let order = MembershipOrder::paid(&membership, &plan, OrderKind::Renewal, None);
                self.orders.create(&order).await?;
                Ok(Settled::Renewed)
            }
            None if membership.refresh_status(now) => {
                self.memberships.update(&membership).await?;
                Ok(Settled::Expired)
            }
            None => Ok(Settled::Unchanged),
        }
    }

    /// Membership counts by status.
    pub async fn status_counts(&self) -> AppResult<Vec<(MembershipStatus, u64)>> {
        self.memberships.count_by_status().await
    }

    /// Most recent orders of a user.
    pub async fn recent_orders(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<MembershipOrder>> {
        let mut orders = self.orders.list_for_user(user_id).await?;
        orders.truncate(limit);
        Ok(orders)
    }

    /// Attach plan name and derived fields.
    pub async fn view(&self, membership: Membership) -> AppResult<MembershipView> {
        let plan = self.plans.find_by_id(membership.plan_id).await?;
        Ok(match plan {
            Some(plan) => view_with_plan(membership, &plan),
            None => derive_view(membership, String::new()),
        })
    }

    async fn plan_on_sale(&self, plan_id: Uuid) -> AppResult<MembershipPlan> {
        let plan = self
            .plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))?;
        if !plan.is_active {
            return Err(AppError::validation("This plan is no longer offered"));
        }
        Ok(plan)
    }

    /// Load a membership the caller owns, or any membership for staff.
    async fn load_accessible(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Membership> {
        let membership = self
            .memberships
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Membership not found"))?;
        if membership.user_id != ctx.user_id && !ctx.is_staff() {
            return Err(AppError::forbidden("Access denied"));
        }
        Ok(membership)
    }
}

fn view_with_plan(membership: Membership, plan: &MembershipPlan) -> MembershipView {
    derive_view(membership, plan.name.clone())
}

fn derive_view(membership: Membership, plan_name: String) -> MembershipView {
    let now = Utc::now();
    let days_remaining = if membership.is_current(now) {
        (membership.end_date - now).num_days()
    } else {
        0
    };
    MembershipView {
        is_frozen: membership.is_frozen(now),
        days_remaining,
        plan_name,
        membership,
    }
}

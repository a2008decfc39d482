//! Analytics aggregation with a short-lived cache.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use uuid::Uuid;

use fithub_core::{AppError, AppResult};
use fithub_database::Repositories;
use fithub_database::repositories::{
    MembershipRepository, OrderRepository, PlanRepository, UserRepository,
};
use fithub_entity::membership::MembershipStatus;
use fithub_entity::user::UserRole;

const REPORT_KEY: &str = "report";

/// Paid revenue of one plan in one currency.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRevenueLine {
    /// Plan ID.
    pub plan_id: Uuid,
    /// Plan name, empty if the plan no longer exists.
    pub plan_name: String,
    /// Currency.
    pub currency: String,
    /// Sum in minor units.
    pub total_cents: i64,
    /// Number of paid orders.
    pub orders: i64,
}

/// Business snapshot for the admin analytics page.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    /// When the snapshot was computed.
    pub generated_at: DateTime<Utc>,
    /// Users per role.
    pub users_by_role: BTreeMap<String, u64>,
    /// Memberships per status.
    pub memberships_by_status: BTreeMap<String, u64>,
    /// Revenue per plan.
    pub revenue_by_plan: Vec<PlanRevenueLine>,
    /// Orders of any status.
    pub total_orders: u64,
}

/// Headcount figures for the staff dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StaffSummary {
    /// Registered members.
    pub members: u64,
    /// Memberships currently active.
    pub active_memberships: u64,
    /// Memberships that ran out.
    pub expired_memberships: u64,
    /// Snapshot time.
    pub generated_at: DateTime<Utc>,
}

/// Computes analytics and caches the result for a configured TTL.
#[derive(Clone)]
pub struct AnalyticsService {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
    memberships: Arc<dyn MembershipRepository>,
    orders: Arc<dyn OrderRepository>,
    cache: Cache<&'static str, Arc<AnalyticsReport>>,
}

impl AnalyticsService {
    /// Creates a new analytics service caching reports for `ttl`.
    pub fn new(repos: &Repositories, ttl: Duration) -> Self {
        Self {
            users: repos.users.clone(),
            plans: repos.plans.clone(),
            memberships: repos.memberships.clone(),
            orders: repos.orders.clone(),
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// The cached report, recomputed once the TTL has passed.
    pub async fn report(&self) -> AppResult<Arc<AnalyticsReport>> {
        self.cache
            .try_get_with(REPORT_KEY, async { self.compute().await.map(Arc::new) })
            .await
            .map_err(|e: Arc<AppError>| (*e).clone())
    }

    /// Drop the cached report.
    pub async fn invalidate(&self) {
        self.cache.invalidate(REPORT_KEY).await;
    }

    /// Figures for the staff dashboard.
    pub async fn staff_summary(&self) -> AppResult<StaffSummary> {
        let report = self.report().await?;
        let count = |map: &BTreeMap<String, u64>, key: &str| map.get(key).copied().unwrap_or(0);
        Ok(StaffSummary {
            members: count(&report.users_by_role, UserRole::Member.as_str()),
            active_memberships: count(
                &report.memberships_by_status,
                MembershipStatus::Active.as_str(),
            ),
            expired_memberships: count(
                &report.memberships_by_status,
                MembershipStatus::Expired.as_str(),
            ),
            generated_at: report.generated_at,
        })
    }

    async fn compute(&self) -> AppResult<AnalyticsReport> {
        let users_by_role = self
            .users
            .count_by_role()
            .await?
            .into_iter()
            .map(|(role, n)| (role.as_str().to_string(), n))
            .collect();

        let memberships_by_status = self
            .memberships
            .count_by_status()
            .await?
            .into_iter()
            .map(|(status, n)| (status.as_str().to_string(), n))
            .collect();

        let plan_names: BTreeMap<Uuid, String> = self
            .plans
            .list(true)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let revenue_by_plan = self
            .orders
            .revenue_by_plan()
            .await?
            .into_iter()
            .map(|r| PlanRevenueLine {
                plan_name: plan_names.get(&r.plan_id).cloned().unwrap_or_default(),
                plan_id: r.plan_id,
                currency: r.currency,
                total_cents: r.total_cents,
                orders: r.orders,
            })
            .collect();

        let total_orders = self.orders.count().await?;
        tracing::debug!(total_orders, "Computed analytics report");

        Ok(AnalyticsReport {
            generated_at: Utc::now(),
            users_by_role,
            memberships_by_status,
            revenue_by_plan,
            total_orders,
        })
    }
}

use std::collections::BTreeMap;

use async_trait::async_trait;
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_entity::membership::{MembershipOrder, OrderStatus};

use super::MemoryStore;
use crate::repositories::{OrderRepository, PlanRevenue};

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: &MembershipOrder) -> AppResult<MembershipOrder> {
        self.orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<MembershipOrder>> {
        let mut list: Vec<MembershipOrder> = self
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| o.value().clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn revenue_by_plan(&self) -> AppResult<Vec<PlanRevenue>> {
        let mut totals: BTreeMap<(Uuid, String), (i64, i64)> = BTreeMap::new();
        for order in self.orders.iter().filter(|o| o.status == OrderStatus::Paid) {
            let entry = totals
                .entry((order.plan_id, order.currency.clone()))
                .or_default();
            entry.0 += order.amount_cents;
            entry.1 += 1;
        }
        Ok(totals
            .into_iter()
            .map(|((plan_id, currency), (total_cents, orders))| PlanRevenue {
                plan_id,
                currency,
                total_cents,
                orders,
            })
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.orders.len() as u64)
    }
}

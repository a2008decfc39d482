use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use fithub_core::{AppError, AppResult};
use fithub_entity::membership::{Membership, MembershipStatus};

use super::MemoryStore;
use crate::repositories::MembershipRepository;

impl MemoryStore {
    /// Point the user's active-membership index at `membership`, or clear it
    /// when the membership is no longer active.
    fn index_active(&self, membership: &Membership) -> AppResult<()> {
        if membership.status != MembershipStatus::Active {
            self.active_by_user
                .remove_if(&membership.user_id, |_, id| *id == membership.id);
            return Ok(());
        }

        match self.active_by_user.entry(membership.user_id) {
            Entry::Occupied(mut slot) => {
                let current = *slot.get();
                let other_active = current != membership.id
                    && self
                        .memberships
                        .get(&current)
                        .is_some_and(|m| m.status == MembershipStatus::Active);
                if other_active {
                    return Err(AppError::conflict("User already has an active membership"));
                }
                slot.insert(membership.id);
            }
            Entry::Vacant(slot) => {
                slot.insert(membership.id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Membership>> {
        Ok(self.memberships.get(&id).map(|m| m.value().clone()))
    }

    async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Option<Membership>> {
        let id = self.active_by_user.get(&user_id).map(|r| *r.value());
        Ok(id
            .and_then(|id| self.memberships.get(&id).map(|m| m.value().clone()))
            .filter(|m| m.status == MembershipStatus::Active))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Membership>> {
        let mut list: Vec<Membership> = self
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.value().clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn create(&self, membership: &Membership) -> AppResult<Membership> {
        self.index_active(membership)?;
        self.memberships.insert(membership.id, membership.clone());
        Ok(membership.clone())
    }

    async fn update(&self, membership: &Membership) -> AppResult<Membership> {
        if !self.memberships.contains_key(&membership.id) {
            return Err(AppError::not_found(format!(
                "Membership {} not found",
                membership.id
            )));
        }
        self.index_active(membership)?;
        self.memberships.insert(membership.id, membership.clone());
        Ok(membership.clone())
    }

    async fn list_due(&self, now: DateTime<Utc>) -> AppResult<Vec<Membership>> {
        Ok(self
            .memberships
            .iter()
            .filter(|m| m.status == MembershipStatus::Active && m.is_past_end(now))
            .map(|m| m.value().clone())
            .collect())
    }

    async fn count_by_status(&self) -> AppResult<Vec<(MembershipStatus, u64)>> {
        Ok(MembershipStatus::ALL
            .iter()
            .map(|status| {
                let n = self
                    .memberships
                    .iter()
                    .filter(|m| m.status == *status)
                    .count() as u64;
                (*status, n)
            })
            .collect())
    }
}

//! Membership store operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_entity::membership::{Membership, MembershipStatus};

/// Persistence of memberships.
///
/// A user holds at most one membership with status `active`; inserting or
/// reactivating a second one fails with `Conflict`.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a membership by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Membership>>;

    /// The membership currently marked active for a user, if any.
    async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Option<Membership>>;

    /// All memberships of a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Membership>>;

    /// Insert a membership.
    async fn create(&self, membership: &Membership) -> AppResult<Membership>;

    /// Overwrite an existing membership.
    async fn update(&self, membership: &Membership) -> AppResult<Membership>;

    /// Active memberships whose period ended at or before `now`.
    async fn list_due(&self, now: DateTime<Utc>) -> AppResult<Vec<Membership>>;

    /// Number of memberships in each status.
    async fn count_by_status(&self) -> AppResult<Vec<(MembershipStatus, u64)>>;
}

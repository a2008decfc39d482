//! In-memory store backed by `DashMap`.
//!
//! Used for development and tests. One [`MemoryStore`] implements every
//! repository trait; uniqueness rules (email, one active membership per
//! user) are enforced with secondary indexes updated through `entry()` so
//! concurrent writers cannot both succeed.

mod membership;
mod order;
mod plan;
mod user;

use dashmap::DashMap;
use uuid::Uuid;

use fithub_entity::membership::{Membership, MembershipOrder, MembershipPlan};
use fithub_entity::user::User;

/// Process-local store for all FitHub records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// Normalized email → user id.
    emails: DashMap<String, Uuid>,
    plans: DashMap<Uuid, MembershipPlan>,
    memberships: DashMap<Uuid, Membership>,
    /// User id → id of that user's active membership.
    active_by_user: DashMap<Uuid, Uuid>,
    orders: DashMap<Uuid, MembershipOrder>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

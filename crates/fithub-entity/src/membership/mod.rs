//! Membership domain entities: plan catalogue, subscriptions, orders.

pub mod model;
pub mod order;
pub mod plan;

pub use model::{Membership, MembershipStatus};
pub use order::{MembershipOrder, OrderKind, OrderStatus};
pub use plan::{CreatePlan, MembershipPlan, UpdatePlan};

//! Typed data-access boundary.
//!
//! Each trait has one method per store operation. Handlers and services
//! only see these traits; the in-memory and PostgreSQL stores implement
//! them interchangeably.

pub mod membership;
pub mod order;
pub mod plan;
pub mod user;

pub use membership::MembershipRepository;
pub use order::{OrderRepository, PlanRevenue};
pub use plan::PlanRepository;
pub use user::UserRepository;

//! Membership plans, subscriptions, and the expiry sweeper.

pub mod plan;
pub mod service;
pub mod sweeper;

pub use plan::PlanService;
pub use service::{
    MemberSummary, MembershipOverview, MembershipService, MembershipView, Purchase, PurchaseResult,
};
pub use sweeper::{MembershipSweeper, SweepReport};

//! # fithub-service
//!
//! Business logic service layer for FitHub. Each service orchestrates the
//! typed repositories and auth primitives to implement one group of use
//! cases.
//!
//! Services take their repositories at construction and are cheap to
//! clone into `AppState`.

pub mod analytics;
pub mod context;
pub mod membership;
pub mod seed;
pub mod user;

pub use analytics::{AnalyticsReport, AnalyticsService, StaffSummary};
pub use context::RequestContext;
pub use membership::{MembershipService, MembershipSweeper, PlanService};
pub use seed::{SeedOutcome, seed};
pub use user::{AdminUserService, UserService};

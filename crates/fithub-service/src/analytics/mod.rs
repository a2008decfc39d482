//! Aggregated reporting for administrators and staff.

pub mod service;

pub use service::{AnalyticsReport, AnalyticsService, PlanRevenueLine, StaffSummary};

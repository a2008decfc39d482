//! Admin handlers behind the admin gate.

pub mod analytics;
pub mod plans;
pub mod users;

//! Role gates for the role-scoped API areas.

pub mod gate;

pub use gate::{ADMIN_GATE, MEMBER_GATE, RoleGate, STAFF_GATE};

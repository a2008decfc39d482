//! Account self-service and administration.

pub mod admin;
pub mod service;

pub use admin::{AdminUpdateUser, AdminUserService};
pub use service::{ChangePassword, UserService};

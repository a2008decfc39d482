//! Session lifecycle: login, registration, logout, device trust, and
//! external identity sync.

pub mod manager;

pub use manager::{LoginOutcome, Registration, SessionManager};

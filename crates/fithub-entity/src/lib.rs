//! # fithub-entity
//!
//! Domain entity models for FitHub. Every struct in this crate represents
//! a stored record or a domain value object. Stored records additionally
//! derive `sqlx::FromRow` for the PostgreSQL store.

pub mod membership;
pub mod user;

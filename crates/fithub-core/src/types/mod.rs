//! Shared types used across the FitHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};

//! # fithub-core
//!
//! Core crate for FitHub. Contains the configuration schema, the unified
//! error type, and small shared types such as pagination.
//!
//! This crate has **no** internal dependencies on other FitHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

//! # fithub-api
//!
//! HTTP API layer for FitHub built on Axum.
//!
//! Provides all REST endpoints, role-gate and logging middleware, CORS,
//! extractors, DTOs, and error mapping, plus the server bootstrap used by
//! the `fithub-server` binary.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

//! Convenience result type alias for FitHub.

use crate::error::AppError;

/// A specialized `Result` type for FitHub operations.
pub type AppResult<T> = Result<T, AppError>;

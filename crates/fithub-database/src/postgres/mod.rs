//! PostgreSQL repository implementations.

mod membership;
mod order;
mod plan;
mod user;

pub use membership::PgMembershipRepository;
pub use order::PgOrderRepository;
pub use plan::PgPlanRepository;
pub use user::PgUserRepository;

use fithub_core::{AppError, ErrorKind};

/// Wrap a sqlx failure with the operation that caused it.
fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Whether the error is a violation of the named unique constraint.
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}

//! Listing query extractors.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use fithub_core::AppError;
use fithub_core::types::PageRequest;
use fithub_entity::user::UserRole;

use crate::error::ApiError;

/// `?page=&per_page=`, clamped to the allowed range.
#[derive(Debug, Clone, Copy)]
pub struct Paged(pub PageRequest);

impl<S> FromRequestParts<S> for Paged
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(page) = Query::<PageRequest>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError(AppError::validation(format!("Invalid paging parameters: {e}"))))?;
        Ok(Self(page.normalized()))
    }
}

/// `?role=` filter for the admin user list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleFilter {
    pub role: Option<UserRole>,
}

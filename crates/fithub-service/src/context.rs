//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fithub_auth::Claims;
use fithub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from verified session claims and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The current session ID.
    pub session_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Email from the token.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for a verified session.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            session_id: claims.sid,
            role: claims.role,
            email: claims.email.clone(),
            request_time: Utc::now(),
        }
    }

    /// Whether the caller works at the gym.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Whether the caller may manage other administrators.
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }
}

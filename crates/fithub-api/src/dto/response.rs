//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fithub_auth::Claims;
use fithub_entity::membership::MembershipOrder;
use fithub_entity::user::{User, UserProfile, UserRole};
use fithub_service::membership::MembershipView;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// The identity a session represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role embedded in the token.
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

impl From<&Claims> for SessionUser {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role,
        }
    }
}

/// Session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session ID, also in the `session_id` cookie.
    pub id: Uuid,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl From<&Claims> for SessionInfo {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sid,
            expires_at: claims.expires_at(),
        }
    }
}

/// Body of login, registration, and session checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Always `true`.
    pub success: bool,
    /// The authenticated user.
    pub user: SessionUser,
    /// The session.
    pub session: SessionInfo,
}

impl SessionResponse {
    /// Response for a freshly issued session.
    pub fn issued(user: &User, claims: &Claims) -> Self {
        Self {
            success: true,
            user: SessionUser::from(user),
            session: SessionInfo::from(claims),
        }
    }

    /// Response for an existing verified session.
    pub fn current(claims: &Claims) -> Self {
        Self {
            success: true,
            user: SessionUser::from(claims),
            session: SessionInfo::from(claims),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Device-trust grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceTrustResponse {
    /// When the trust lapses.
    pub expires_at: DateTime<Utc>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Store backend name.
    pub store: String,
    /// Uptime.
    pub uptime_seconds: u64,
}

/// Member dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct MemberDashboard {
    /// The member.
    pub user: UserProfile,
    /// Active membership, if any.
    pub membership: Option<MembershipView>,
    /// Latest orders.
    pub recent_orders: Vec<MembershipOrder>,
}

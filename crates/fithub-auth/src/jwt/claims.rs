//! JWT claims structure carried in session and device-trust tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fithub_entity::user::UserRole;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: Uuid,
    /// Session ID, mirrored in the `session_id` cookie.
    pub sid: Uuid,
    /// Email at the time of issuance.
    pub email: String,
    /// Display name at the time of issuance.
    pub name: String,
    /// User role at the time of issuance.
    pub role: UserRole,
    /// What the token may be used for.
    pub kind: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID for revocation tracking.
    pub jti: Uuid,
}

/// Distinguishes browser sessions from remembered-device tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Authenticates API requests.
    Session,
    /// Only exchangeable for a new session at `/api/auth/device-login`.
    DeviceTrust,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

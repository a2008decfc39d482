//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2 password hash. `None` for accounts created by an external
    /// identity provider.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// User role.
    pub role: UserRole,
    /// Deactivated accounts cannot log in by any method.
    pub is_active: bool,
    /// External identity provider last used to log in, if any.
    pub oauth_provider: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this account can log in with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Public view of the user, safe to return from any endpoint.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Provider for externally created accounts.
    pub oauth_provider: Option<String>,
}

impl CreateUser {
    /// Materialize the record with a fresh id and timestamps.
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            email: normalize_email(&self.email),
            name: self.name,
            password_hash: self.password_hash,
            role: self.role,
            is_active: true,
            oauth_provider: self.oauth_provider,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}

/// User fields returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: UserRole,
    /// Whether the account is active.
    pub is_active: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Canonical form used for uniqueness checks and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

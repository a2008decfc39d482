//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and credential policy.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret. Issuing a session without one is a
    /// configuration error.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Session token lifetime in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Device-trust token lifetime in days.
    #[serde(default = "default_device_trust_ttl")]
    pub device_trust_ttl_days: u64,
    /// Clock skew tolerated when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum number of revoked tokens remembered in memory.
    #[serde(default = "default_revocation_capacity")]
    pub revocation_capacity: u64,
}

impl AuthConfig {
    /// The configured secret, if it is present and non-blank.
    pub fn secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            session_ttl_hours: default_session_ttl(),
            device_trust_ttl_days: default_device_trust_ttl(),
            leeway_seconds: default_leeway(),
            password_min_length: default_password_min(),
            revocation_capacity: default_revocation_capacity(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.secret().map(|_| "****"))
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("device_trust_ttl_days", &self.device_trust_ttl_days)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("password_min_length", &self.password_min_length)
            .field("revocation_capacity", &self.revocation_capacity)
            .finish()
    }
}

fn default_session_ttl() -> u64 {
    24
}

fn default_device_trust_ttl() -> u64 {
    30
}

fn default_leeway() -> u64 {
    5
}

fn default_password_min() -> usize {
    8
}

fn default_revocation_capacity() -> u64 {
    100_000
}

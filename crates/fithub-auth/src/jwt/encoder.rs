//! Session token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use fithub_core::AppError;
use fithub_core::config::AuthConfig;
use fithub_entity::user::User;

use super::claims::{Claims, TokenKind};

/// Creates signed HS256 tokens for users.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC key; `None` when no secret is configured.
    encoding_key: Option<EncodingKey>,
    /// Session token lifetime.
    session_ttl: Duration,
    /// Device-trust token lifetime.
    device_trust_ttl: Duration,
}

/// A freshly signed token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWT.
    pub token: String,
    /// Claims embedded in `token`.
    pub claims: Claims,
}

impl IssuedToken {
    /// Lifetime in seconds, used as the cookie `Max-Age`.
    pub fn max_age_seconds(&self) -> i64 {
        self.claims.exp - self.claims.iat
    }
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("configured", &self.encoding_key.is_some())
            .field("session_ttl", &self.session_ttl)
            .field("device_trust_ttl", &self.device_trust_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: config.secret().map(|s| EncodingKey::from_secret(s.as_bytes())),
            session_ttl: Duration::hours(config.session_ttl_hours as i64),
            device_trust_ttl: Duration::days(config.device_trust_ttl_days as i64),
        }
    }

    /// Lifetime of tokens of the given kind.
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Session => self.session_ttl,
            TokenKind::DeviceTrust => self.device_trust_ttl,
        }
    }

    /// Issue a token of `kind` for `user`, valid from now.
    pub fn issue(&self, user: &User, kind: TokenKind) -> Result<IssuedToken, AppError> {
        self.issue_at(user, kind, Utc::now())
    }

    /// Issue a token of `kind` for `user` as if signed at `now`.
    pub fn issue_at(
        &self,
        user: &User,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let claims = Claims {
            sub: user.id,
            sid: Uuid::new_v4(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            kind,
            iat: now.timestamp(),
            exp: (now + self.ttl(kind)).timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Sign an arbitrary claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        let key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| AppError::configuration("JWT signing secret is not configured"))?;

        encode(&Header::default(), claims, key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

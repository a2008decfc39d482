//! Session token validation and revocation checking.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use fithub_core::config::AuthConfig;

use super::claims::{Claims, TokenKind};
use super::revocation::RevocationList;

/// Validates tokens and checks the revocation list.
///
/// Every failure collapses into `None`; the reason is only logged at debug
/// level so callers answer uniformly with "no session".
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC key; `None` when no secret is configured.
    decoding_key: Option<DecodingKey>,
    /// Validation configuration.
    validation: Validation,
    /// Revoked token IDs.
    revocations: RevocationList,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("configured", &self.decoding_key.is_some())
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, revocations: RevocationList) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: config.secret().map(|s| DecodingKey::from_secret(s.as_bytes())),
            validation,
            revocations,
        }
    }

    /// The revocation list consulted by [`verify`](Self::verify).
    pub fn revocations(&self) -> &RevocationList {
        &self.revocations
    }

    /// Decode `token` and accept it only if it is a live token of `kind`.
    ///
    /// Checks:
    /// 1. Signature validity
    /// 2. Expiration (with leeway)
    /// 3. Token kind
    /// 4. JTI not revoked
    pub async fn verify(&self, token: &str, kind: TokenKind) -> Option<Claims> {
        let Some(key) = self.decoding_key.as_ref() else {
            debug!("Rejecting token: no signing secret configured");
            return None;
        };

        let claims = match decode::<Claims>(token, key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(reason = ?e.kind(), "Rejecting token");
                return None;
            }
        };

        if claims.kind != kind {
            debug!(expected = ?kind, actual = ?claims.kind, "Rejecting token of wrong kind");
            return None;
        }

        if self.revocations.is_revoked(&claims.jti).await {
            debug!(jti = %claims.jti, "Rejecting revoked token");
            return None;
        }

        Some(claims)
    }
}

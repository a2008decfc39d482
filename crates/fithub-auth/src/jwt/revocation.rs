//! In-memory list of revoked token IDs.

use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use super::claims::Claims;

/// Revoked `jti` values, kept until the longest token lifetime has passed.
///
/// Entries are best-effort: the list lives in process memory and is bounded
/// by `capacity`.
#[derive(Debug, Clone)]
pub struct RevocationList {
    /// `jti` → `exp` of the revoked token.
    revoked: Cache<Uuid, i64>,
}

impl RevocationList {
    /// Create a list remembering up to `capacity` tokens for `retention`.
    pub fn new(capacity: u64, retention: Duration) -> Self {
        Self {
            revoked: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(retention)
                .build(),
        }
    }

    /// Mark the token as revoked.
    pub async fn revoke(&self, claims: &Claims) {
        self.revoked.insert(claims.jti, claims.exp).await;
    }

    /// Whether the token ID has been revoked.
    pub async fn is_revoked(&self, jti: &Uuid) -> bool {
        self.revoked.get(jti).await.is_some()
    }
}

//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Force the `Secure` attribute on or off. When unset, cookies are
    /// secure only in production.
    #[serde(default)]
    pub cookie_secure: Option<bool>,
}

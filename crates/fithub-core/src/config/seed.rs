//! Startup data seeding.

use serde::{Deserialize, Serialize};

/// Records created at startup when missing.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct SeedConfig {
    /// Bootstrap super-admin account.
    #[serde(default)]
    pub admin: Option<SeedAdmin>,
    /// Create the starter plan catalogue when no plans exist.
    #[serde(default)]
    pub default_plans: bool,
}

/// Bootstrap super-admin credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct SeedAdmin {
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    #[serde(default = "default_admin_name")]
    pub name: String,
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("admin", &self.admin.as_ref().map(|a| a.email.as_str()))
            .field("default_plans", &self.default_plans)
            .finish()
    }
}

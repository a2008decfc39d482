//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay, and `FITHUB__*`
//! environment variables. Every section has defaults, so an empty
//! configuration boots a development server on the in-memory store.

pub mod analytics;
pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod membership;
pub mod oauth;
pub mod seed;
pub mod session;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use self::analytics::AnalyticsConfig;
pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::membership::MembershipConfig;
pub use self::oauth::{OAuthConfig, OAuthProviderConfig};
pub use self::seed::{SeedAdmin, SeedConfig};
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Deployment environment. Production turns on `Secure` cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Automated tests.
    Test,
    /// Production deployment.
    Production,
}

impl Environment {
    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Test => write!(f, "test"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(AppError::configuration(format!("Unknown environment '{other}'"))),
        }
    }
}

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Data store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing and password policy.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// External identity providers.
    #[serde(default)]
    pub oauth: OAuthConfig,
    /// Membership lifecycle settings.
    #[serde(default)]
    pub membership: MembershipConfig,
    /// Analytics aggregation settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Startup seeding.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Sources, lowest precedence first: the environment name itself (when
    /// it names a known [`Environment`]), `config/default.toml`,
    /// `config/{env}.toml`, then `FITHUB__SECTION__KEY` variables.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// [`AppConfig::load`] with the TOML files read from `dir`.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        if let Ok(environment) = env.parse::<Environment>() {
            builder = builder.set_default("environment", environment.to_string())?;
        }

        let config = builder
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FITHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.session
            .cookie_secure
            .unwrap_or_else(|| self.environment.is_production())
    }
}

//! External identity providers.
//!
//! A provider turns an authorization `code` into an [`ExternalIdentity`];
//! reconciling that identity with a local account happens in
//! [`SessionManager::external_login`](crate::session::SessionManager::external_login).

pub mod client;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fithub_core::AppResult;
use fithub_core::config::OAuthConfig;

pub use self::client::HttpIdentityProvider;

/// Identity asserted by an external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Provider name, e.g. `google`.
    pub provider: String,
    /// Provider-side subject identifier.
    pub subject: String,
    /// Email address; the key used to find the local account.
    pub email: String,
    /// Display name, when the provider shares one.
    pub name: Option<String>,
}

/// An OAuth2 authorization-code provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to, carrying the anti-forgery `state`.
    fn authorize_url(&self, state: &str) -> AppResult<String>;

    /// Exchange an authorization code for the user's identity.
    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity>;
}

/// Configured providers keyed by name.
#[derive(Clone, Default)]
pub struct IdentityProviders {
    providers: HashMap<String, Arc<dyn IdentityProvider>>,
}

impl IdentityProviders {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build HTTP providers for every entry in `oauth.providers`.
    pub fn from_config(config: &OAuthConfig) -> AppResult<Self> {
        let mut registry = Self::new();
        for (name, provider) in &config.providers {
            let client = HttpIdentityProvider::new(name, provider, config.request_timeout_seconds)?;
            registry.register(name, Arc::new(client));
            tracing::info!(provider = %name, "Registered identity provider");
        }
        Ok(registry)
    }

    /// Add or replace a provider.
    pub fn register(&mut self, name: &str, provider: Arc<dyn IdentityProvider>) {
        self.providers.insert(name.to_lowercase(), provider);
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn IdentityProvider>> {
        self.providers.get(&name.to_lowercase()).cloned()
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Fresh anti-forgery nonce for the `state` parameter.
    pub fn new_state() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

impl std::fmt::Debug for IdentityProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProviders")
            .field("providers", &self.names())
            .finish()
    }
}

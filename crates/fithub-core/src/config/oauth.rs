//! External identity provider configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// OAuth login settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Providers keyed by the name used in `/api/auth/oauth/{provider}`.
    #[serde(default)]
    pub providers: HashMap<String, OAuthProviderConfig>,
    /// Create a member account when an unknown email logs in externally.
    #[serde(default)]
    pub auto_provision: bool,
    /// Where the browser lands after a successful external login.
    #[serde(default = "default_success_redirect")]
    pub success_redirect: String,
    /// Generic error page for denied or failed external logins.
    #[serde(default = "default_error_redirect")]
    pub error_redirect: String,
    /// Lifetime of the anti-forgery `oauth_state` cookie.
    #[serde(default = "default_state_ttl")]
    pub state_ttl_seconds: u64,
    /// Timeout for calls to the provider.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            auto_provision: false,
            success_redirect: default_success_redirect(),
            error_redirect: default_error_redirect(),
            state_ttl_seconds: default_state_ttl(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

/// A single OAuth2 authorization-code provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuthProviderConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Authorization endpoint the browser is redirected to.
    pub authorize_url: String,
    /// Token endpoint for the code exchange.
    pub token_url: String,
    /// Endpoint returning the user's profile (`email`, `name`, `sub`).
    pub userinfo_url: String,
    /// Callback registered with the provider.
    pub redirect_url: String,
    /// Requested scopes.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("client_id", &self.client_id)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("redirect_url", &self.redirect_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}

fn default_success_redirect() -> String {
    "/dashboard".to_string()
}

fn default_error_redirect() -> String {
    "/auth/error".to_string()
}

fn default_state_ttl() -> u64 {
    600
}

fn default_timeout() -> u64 {
    10
}

fn default_scopes() -> Vec<String> {
    vec![
        "openid".to_string(),
        "email".to_string(),
        "profile".to_string(),
    ]
}

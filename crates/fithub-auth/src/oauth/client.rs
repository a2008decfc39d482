//! OAuth2 authorization-code flow over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use fithub_core::config::OAuthProviderConfig;
use fithub_core::{AppError, AppResult, ErrorKind};

use super::{ExternalIdentity, IdentityProvider};

/// Provider speaking the standard token and userinfo endpoints.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    name: String,
    config: OAuthProviderConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    #[serde(default)]
    sub: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

impl HttpIdentityProvider {
    /// Create a provider client.
    pub fn new(name: &str, config: &OAuthProviderConfig, timeout_seconds: u64) -> AppResult<Self> {
        Url::parse(&config.authorize_url).map_err(|e| {
            AppError::configuration(format!("Invalid authorize_url for provider '{name}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            name: name.to_lowercase(),
            config: config.clone(),
            client,
        })
    }

    fn external(&self, what: &str, e: reqwest::Error) -> AppError {
        warn!(provider = %self.name, error = %e, "{what}");
        AppError::with_source(ErrorKind::ExternalService, what.to_string(), e)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    fn authorize_url(&self, state: &str) -> AppResult<String> {
        let mut url = Url::parse(&self.config.authorize_url)
            .map_err(|e| AppError::configuration(format!("Invalid authorize_url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state);
        Ok(url.into())
    }

    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("code", code)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("client_id", &self.config.client_id)
            .append_pair("client_secret", &self.config.client_secret)
            .finish();

        let token: TokenResponse = self
            .client
            .post(&self.config.token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.external("Token exchange failed", e))?
            .json()
            .await
            .map_err(|e| self.external("Malformed token response", e))?;

        let info: UserInfo = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.external("Userinfo request failed", e))?
            .json()
            .await
            .map_err(|e| self.external("Malformed userinfo response", e))?;

        debug!(provider = %self.name, "Received userinfo");
        identity_from_userinfo(&self.name, info)
    }
}

fn identity_from_userinfo(provider: &str, info: UserInfo) -> AppResult<ExternalIdentity> {
    if info.email_verified == Some(false) {
        return Err(AppError::external("Provider reports the email as unverified"));
    }
    let email = info
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::external("Provider did not return an email address"))?;
    let subject = match info.sub.or(info.id) {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => email.clone(),
    };
    Ok(ExternalIdentity {
        provider: provider.to_string(),
        subject,
        email,
        name: info.name.filter(|n| !n.trim().is_empty()),
    })
}

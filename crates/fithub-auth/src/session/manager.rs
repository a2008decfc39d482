//! Session lifecycle manager.

use std::sync::Arc;

use http::HeaderMap;
use tracing::{info, warn};

use fithub_core::{AppError, AppResult};
use fithub_database::repositories::UserRepository;
use fithub_entity::user::{CreateUser, User, UserRole};

use crate::cookie;
use crate::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenKind};
use crate::oauth::ExternalIdentity;
use crate::password::{PasswordHasher, PasswordValidator};

/// Message for every credential failure; it never reveals which part was wrong.
const INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Message for deactivated accounts.
const ACCOUNT_DISABLED: &str = "Account is disabled";

/// Result of a successful login by any method.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// The new session token.
    pub session: IssuedToken,
}

/// Self-service sign-up data.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// User store.
    users: Arc<dyn UserRepository>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        users: Arc<dyn UserRepository>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            encoder,
            decoder,
            hasher,
            validator,
        }
    }

    /// Create a member account and log it in.
    ///
    /// A duplicate email fails with `Conflict` and creates nothing.
    pub async fn register(&self, input: Registration) -> AppResult<LoginOutcome> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        self.validator
            .validate(&input.password, &[input.email.as_str(), name.as_str()])?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(CreateUser {
                email: input.email,
                name,
                password_hash: Some(password_hash),
                role: UserRole::Member,
                oauth_provider: None,
            })
            .await?;

        info!(user_id = %user.id, "Registered new member");
        self.start_session(user).await
    }

    /// Authenticate with email and password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };
        if !self.hasher.verify_password(password, hash)? {
            info!(user_id = %user.id, "Rejected login: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        self.start_session(user).await
    }

    /// The verified session claims carried by the request, if any.
    pub async fn verify_request(&self, headers: &HeaderMap) -> Option<Claims> {
        let token = cookie::session_token(headers)?;
        self.decoder.verify(&token, TokenKind::Session).await
    }

    /// The request's session, checked against the stored account.
    ///
    /// `None` when there is no valid token, the account is gone, or its role
    /// changed since the token was issued. A deactivated account is
    /// `Authorization`.
    pub async fn current_session(&self, headers: &HeaderMap) -> AppResult<Option<Claims>> {
        let Some(claims) = self.verify_request(headers).await else {
            return Ok(None);
        };
        let Some(user) = self.users.find_by_id(claims.sub).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Err(AppError::forbidden(ACCOUNT_DISABLED));
        }
        if user.role != claims.role {
            info!(user_id = %user.id, session_id = %claims.sid, "Rejected session issued for a previous role");
            return Ok(None);
        }
        Ok(Some(claims))
    }

    /// Revoke the request's session token, if it still verifies.
    pub async fn logout(&self, headers: &HeaderMap) -> Option<Claims> {
        let claims = self.verify_request(headers).await?;
        self.decoder.revocations().revoke(&claims).await;
        info!(user_id = %claims.sub, session_id = %claims.sid, "Logged out");
        Some(claims)
    }

    /// Issue a device-trust token for the logged-in user.
    pub async fn trust_device(&self, claims: &Claims) -> AppResult<IssuedToken> {
        let user = self.active_user(claims).await?;
        let issued = self.encoder.issue(&user, TokenKind::DeviceTrust)?;
        info!(user_id = %user.id, "Trusted device");
        Ok(issued)
    }

    /// Exchange a device-trust token for a new session.
    pub async fn device_login(&self, trust_token: &str) -> AppResult<LoginOutcome> {
        let claims = self
            .decoder
            .verify(trust_token, TokenKind::DeviceTrust)
            .await
            .ok_or_else(|| AppError::unauthorized("Device is not trusted"))?;
        let user = self.active_user(&claims).await?;
        self.start_session(user).await
    }

    /// Revoke a device-trust token. Invalid tokens are ignored.
    pub async fn revoke_device(&self, trust_token: &str) {
        if let Some(claims) = self
            .decoder
            .verify(trust_token, TokenKind::DeviceTrust)
            .await
        {
            self.decoder.revocations().revoke(&claims).await;
            info!(user_id = %claims.sub, "Revoked device trust");
        }
    }

    /// Reconcile an external identity with the local account and log it in.
    ///
    /// - existing account: record the provider and fill an empty name; the
    ///   local role is kept
    /// - unknown email with `auto_provision`: create a member
    /// - unknown email otherwise: `AccountNotFound`
    pub async fn external_login(
        &self,
        identity: ExternalIdentity,
        auto_provision: bool,
    ) -> AppResult<LoginOutcome> {
        let user = match self.users.find_by_email(&identity.email).await? {
            Some(mut user) => {
                let fill_name = user.name.trim().is_empty();
                let new_provider = user.oauth_provider.as_deref() != Some(identity.provider.as_str());
                if fill_name || new_provider {
                    if fill_name {
                        user.name = identity.name.clone().unwrap_or_default();
                    }
                    user.oauth_provider = Some(identity.provider.clone());
                    user = self.users.update(&user).await?;
                }
                user
            }
            None if auto_provision => {
                let name = identity
                    .name
                    .clone()
                    .unwrap_or_else(|| local_part(&identity.email));
                let user = self
                    .users
                    .create(CreateUser {
                        email: identity.email.clone(),
                        name,
                        password_hash: None,
                        role: UserRole::Member,
                        oauth_provider: Some(identity.provider.clone()),
                    })
                    .await?;
                info!(user_id = %user.id, provider = %identity.provider, "Provisioned account from external login");
                user
            }
            None => {
                warn!(provider = %identity.provider, "External login for unknown account");
                return Err(AppError::account_not_found(
                    "No account is registered for this email",
                ));
            }
        };

        self.start_session(user).await
    }

    async fn active_user(&self, claims: &Claims) -> AppResult<User> {
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
        if !user.is_active {
            return Err(AppError::forbidden(ACCOUNT_DISABLED));
        }
        Ok(user)
    }

    async fn start_session(&self, mut user: User) -> AppResult<LoginOutcome> {
        if !user.is_active {
            info!(user_id = %user.id, "Rejected login: account disabled");
            return Err(AppError::forbidden(ACCOUNT_DISABLED));
        }

        let session = self.encoder.issue(&user, TokenKind::Session)?;
        self.users.touch_last_login(user.id).await?;
        user.last_login_at = Some(chrono::Utc::now());

        info!(user_id = %user.id, session_id = %session.claims.sid, role = %user.role, "Session started");
        Ok(LoginOutcome { user, session })
    }
}

fn local_part(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

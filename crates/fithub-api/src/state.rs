//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fithub_auth::{
    CookiePolicy, IdentityProviders, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
    RevocationList, SessionManager,
};
use fithub_core::config::AppConfig;
use fithub_database::Repositories;
use fithub_service::{
    AdminUserService, AnalyticsService, MembershipService, PlanService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for the health endpoint
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Typed repositories over the configured store
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Session issue, verify, and revoke
    pub session_manager: Arc<SessionManager>,
    /// Set-Cookie rendering
    pub cookies: CookiePolicy,
    /// External identity providers
    pub identity_providers: Arc<IdentityProviders>,

    // ── Services ─────────────────────────────────────────────
    /// Self-service account operations
    pub user_service: Arc<UserService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
    /// Plan catalogue
    pub plan_service: Arc<PlanService>,
    /// Membership lifecycle
    pub membership_service: Arc<MembershipService>,
    /// Cached analytics
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    /// Wire the auth stack and services over `repos`.
    pub fn new(config: AppConfig, repos: Repositories, identity_providers: IdentityProviders) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));

        // Revoked ids only need to outlive the longest token.
        let retention = Duration::from_secs(
            (config.auth.session_ttl_hours * 3600).max(config.auth.device_trust_ttl_days * 86_400),
        );
        let revocations = RevocationList::new(config.auth.revocation_capacity, retention);
        let decoder = Arc::new(JwtDecoder::new(&config.auth, revocations));

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&repos.users),
            Arc::clone(&encoder),
            Arc::clone(&decoder),
            Arc::clone(&hasher),
            Arc::clone(&validator),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repos.users),
            Arc::clone(&hasher),
            Arc::clone(&validator),
        ));
        let admin_user_service = Arc::new(AdminUserService::new(Arc::clone(&repos.users)));
        let plan_service = Arc::new(PlanService::new(Arc::clone(&repos.plans)));
        let membership_service = Arc::new(MembershipService::new(
            &repos,
            config.membership.max_freeze_days,
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            &repos,
            Duration::from_secs(config.analytics.cache_ttl_seconds),
        ));

        Self {
            cookies: CookiePolicy::new(config.cookie_secure()),
            config: Arc::new(config),
            started_at: Instant::now(),
            repos,
            session_manager,
            identity_providers: Arc::new(identity_providers),
            user_service,
            admin_user_service,
            plan_service,
            membership_service,
            analytics_service,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment)
            .field("store", &self.repos.health.backend())
            .field("identity_providers", &self.identity_providers.names())
            .finish()
    }
}

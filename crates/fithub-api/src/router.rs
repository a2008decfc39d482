//! Route definitions for the FitHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(oauth_routes())
        .merge(user_routes())
        .merge(plan_routes())
        .merge(membership_routes())
        .merge(member_routes(&state))
        .merge(staff_routes(&state))
        .merge(admin_routes(&state));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Auth endpoints: register, login, logout, session, device trust
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/session", get(handlers::auth::session))
        .route(
            "/auth/device-trust",
            post(handlers::auth::trust_device).delete(handlers::auth::revoke_device_trust),
        )
        .route("/auth/device-login", post(handlers::auth::device_login))
}

/// External identity providers
fn oauth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/oauth/{provider}/authorize",
            get(handlers::oauth::authorize),
        )
        .route(
            "/auth/oauth/{provider}/callback",
            get(handlers::oauth::callback),
        )
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route("/users/me/password", put(handlers::user::change_password))
}

/// Public plan catalogue
fn plan_routes() -> Router<AppState> {
    Router::new().route("/plans", get(handlers::plan::list_plans))
}

/// Membership lifecycle for any authenticated user
fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/memberships/me", get(handlers::membership::my_memberships))
        .route("/memberships/purchase", post(handlers::membership::purchase))
        .route("/memberships/{id}/renew", post(handlers::membership::renew))
        .route("/memberships/{id}/cancel", post(handlers::membership::cancel))
        .route("/memberships/{id}/freeze", post(handlers::membership::freeze))
}

/// Member area
fn member_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/member/dashboard",
            get(handlers::dashboard::member_dashboard),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rbac::require_member,
        ))
}

/// Staff area
fn staff_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/staff/dashboard", get(handlers::dashboard::staff_dashboard))
        .route("/staff/members", get(handlers::dashboard::staff_members))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rbac::require_staff,
        ))
}

/// Admin area
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/analytics", get(handlers::admin::analytics::analytics))
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}",
            get(handlers::admin::users::get_user).put(handlers::admin::users::update_user),
        )
        .route(
            "/admin/plans",
            get(handlers::admin::plans::list_plans).post(handlers::admin::plans::create_plan),
        )
        .route("/admin/plans/{id}", put(handlers::admin::plans::update_plan))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rbac::require_admin,
        ))
}

//! Application builder: wires store, auth, services, and the background
//! sweeper into a running Axum server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use fithub_auth::{IdentityProviders, PasswordHasher};
use fithub_core::config::AppConfig;
use fithub_core::error::AppError;
use fithub_database::Repositories;
use fithub_service::{MembershipSweeper, seed};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the FitHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.environment,
        "Starting FitHub v{}",
        env!("CARGO_PKG_VERSION")
    );
    if config.auth.secret().is_none() {
        tracing::warn!("auth.jwt_secret is not set; logins will fail until it is configured");
    }

    // ── Step 1: Store ────────────────────────────────────────────
    let repos = Repositories::connect(&config.database).await?;
    tracing::info!(store = repos.health.backend(), "Store ready");

    // ── Step 2: Seed data ────────────────────────────────────────
    let outcome = seed(&config.seed, &repos, &PasswordHasher::new()).await?;
    tracing::debug!(?outcome, "Seeding complete");

    // ── Step 3: Identity providers ───────────────────────────────
    let providers = IdentityProviders::from_config(&config.oauth)?;
    tracing::info!(providers = ?providers.names(), "Identity providers configured");

    // ── Step 4: State ────────────────────────────────────────────
    let state = AppState::new(config.clone(), repos.clone(), providers);

    // ── Step 5: Shutdown channel & sweeper ───────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if config.membership.sweep_interval_seconds > 0 {
        let sweeper = MembershipSweeper::new(
            Arc::clone(&state.membership_service),
            Duration::from_secs(config.membership.sweep_interval_seconds),
        );
        let cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            sweeper.run(cancel).await;
        }))
    } else {
        tracing::info!("Membership sweeper disabled");
        None
    };

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FitHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Drain background tasks ───────────────────────────
    if let Some(handle) = sweeper_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Membership sweeper did not stop in time");
        }
    }
    repos.health.close().await;

    tracing::info!("FitHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

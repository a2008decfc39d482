//! Background task that settles memberships whose period has ended.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;
use tokio::time;

use super::service::MembershipService;

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Memberships moved to `expired`.
    pub expired: u64,
    /// Memberships auto-renewed.
    pub renewed: u64,
}

/// Periodically expires or auto-renews due memberships.
#[derive(Clone)]
pub struct MembershipSweeper {
    service: Arc<MembershipService>,
    interval: Duration,
}

impl MembershipSweeper {
    /// Create a sweeper running every `interval`.
    pub fn new(service: Arc<MembershipService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Settle everything due now.
    pub async fn sweep_once(&self) -> SweepReport {
        match self.service.settle_due(Utc::now()).await {
            Ok((expired, renewed)) => {
                if expired + renewed > 0 {
                    tracing::info!(expired, renewed, "Membership sweep completed");
                }
                SweepReport { expired, renewed }
            }
            Err(e) => {
                tracing::error!(error = %e, "Membership sweep failed");
                SweepReport::default()
            }
        }
    }

    /// Run until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(interval_seconds = self.interval.as_secs(), "Membership sweeper started");
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.sweep_once().await;
                }
            }
        }

        tracing::info!("Membership sweeper stopped");
    }
}
